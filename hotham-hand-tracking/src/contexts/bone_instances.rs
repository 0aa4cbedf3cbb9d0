use glam::Affine3A;

/// Something that can draw one visual proxy per bone, such as an instanced mesh.
pub trait BoneRenderer {
    /// Remove every instance added so far.
    fn clear_instances(&mut self);
    /// Place one proxy at `transform`.
    fn add_instance(&mut self, transform: Affine3A, visible: bool);
}

/// A single bone proxy requested this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneInstance {
    /// Where the proxy should be drawn, scaled by the bone radius
    pub transform: Affine3A,
    /// Should the proxy be shown?
    pub visible: bool,
}

/// Component that collects the bone proxies of a single hand.
///
/// The host's renderer reads [`BoneInstances::instances`] after the hands have been updated and
/// draws them with whatever primitive it likes.
#[derive(Debug, Clone, Default)]
pub struct BoneInstances {
    instances: Vec<BoneInstance>,
}

impl BoneInstances {
    /// Every proxy requested since the last clear.
    pub fn instances(&self) -> &[BoneInstance] {
        &self.instances
    }

    /// Number of proxies requested since the last clear.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Were no proxies requested?
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl BoneRenderer for BoneInstances {
    fn clear_instances(&mut self) {
        self.instances.clear();
    }

    fn add_instance(&mut self, transform: Affine3A, visible: bool) {
        self.instances.push(BoneInstance { transform, visible });
    }
}
