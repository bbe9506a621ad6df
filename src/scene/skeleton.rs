use glam::{Affine3A, Mat4, Quat, Vec3};
use rustc_hash::FxHashMap;
use uuid::Uuid;

use crate::errors::{Result, TalonError};

/// A single joint in a skeleton.
///
/// The bind TRS is the rest pose the mesh was weighted against; the sampled
/// `local_transform` starts there and is overwritten by the animation
/// evaluator each frame it runs. `global_transform` is derived during
/// propagation and never set directly.
#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,

    /// Index of the parent bone, always strictly smaller than this bone's
    /// own index (`None` for roots). Validated by [`Skeleton::new`].
    pub parent_index: Option<usize>,

    // === Bind pose (static after import) ===
    pub bind_position: Vec3,
    pub bind_rotation: Quat,
    pub bind_scale: Vec3,

    /// Transforms a vertex from mesh bind space into this bone's local space.
    pub inverse_bind_matrix: Affine3A,

    // === Runtime pose (mutated every evaluated frame) ===
    pub(crate) local_transform: Affine3A,
    pub(crate) global_transform: Affine3A,
}

impl Bone {
    /// Builds a bone at its bind pose.
    #[must_use]
    pub fn new(
        name: &str,
        parent_index: Option<usize>,
        bind_position: Vec3,
        bind_rotation: Quat,
        bind_scale: Vec3,
        inverse_bind_matrix: Affine3A,
    ) -> Self {
        let local = Affine3A::from_scale_rotation_translation(
            bind_scale,
            bind_rotation,
            bind_position,
        );
        Self {
            name: name.to_string(),
            parent_index,
            bind_position,
            bind_rotation,
            bind_scale,
            inverse_bind_matrix,
            local_transform: local,
            global_transform: Affine3A::IDENTITY,
        }
    }

    /// The bind-pose local matrix (`T * R * S` of the bind TRS).
    #[must_use]
    pub fn bind_local_transform(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(
            self.bind_scale,
            self.bind_rotation,
            self.bind_position,
        )
    }

    /// The global transform derived by the last propagation pass.
    #[inline]
    #[must_use]
    pub fn global_transform(&self) -> &Affine3A {
        &self.global_transform
    }
}

/// Bone hierarchy for one skinned mesh.
///
/// Bones are an ordered array; `bones[i]` corresponds to joint `i` in the
/// shader's joint-matrix uniform. The parent of any bone precedes it in the
/// array, so one forward pass over the array propagates parent globals
/// before any child reads them.
///
/// Built once at import time; only the per-frame pose (`local_transform`,
/// `global_transform`, `joint_matrices`) mutates afterwards.
#[derive(Debug, Clone)]
pub struct Skeleton {
    pub id: Uuid,
    pub name: String,

    bones: Vec<Bone>,

    // Bone-name lookup for track binding.
    name_index: FxHashMap<String, usize>,

    // Final matrix per bone, recomputed every evaluated frame and uploaded
    // as-is to the skinning shader.
    joint_matrices: Vec<Mat4>,
}

impl Skeleton {
    /// Builds a skeleton from an ordered bone array.
    ///
    /// Validates the propagation invariant: every bone's parent index must
    /// be strictly smaller than its own index. Rejecting violations here
    /// (rather than at evaluation time) also rules out cycles.
    pub fn new(name: &str, bones: Vec<Bone>) -> Result<Self> {
        for (i, bone) in bones.iter().enumerate() {
            if let Some(p) = bone.parent_index {
                if p >= i {
                    return Err(TalonError::ForwardBoneReference {
                        bone: bone.name.clone(),
                        index: i,
                        parent: bones.get(p).map_or_else(String::new, |b| b.name.clone()),
                        parent_index: p,
                    });
                }
            }
        }

        let name_index = bones
            .iter()
            .enumerate()
            .map(|(i, b)| (b.name.clone(), i))
            .collect();
        let count = bones.len();

        let mut skeleton = Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            bones,
            name_index,
            joint_matrices: vec![Mat4::IDENTITY; count],
        };
        // Bind pose is a valid pose; make the derived state coherent from
        // the start so an un-animated skeleton still skins correctly.
        skeleton.update_global_transforms();
        Ok(skeleton)
    }

    #[inline]
    #[must_use]
    pub fn bone_count(&self) -> usize {
        self.bones.len()
    }

    #[inline]
    #[must_use]
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Index of the bone with the given name, if any.
    #[must_use]
    pub fn bone_index(&self, name: &str) -> Option<usize> {
        self.name_index.get(name).copied()
    }

    /// Overwrites one bone's sampled local transform. The change becomes
    /// visible in [`Self::joint_matrices`] after the next propagation pass.
    pub fn set_local_transform(&mut self, bone_index: usize, local: Affine3A) {
        if let Some(bone) = self.bones.get_mut(bone_index) {
            bone.local_transform = local;
        }
    }

    /// Resets every bone's sampled pose back to the bind pose.
    pub fn reset_to_bind_pose(&mut self) {
        for bone in &mut self.bones {
            bone.local_transform = bone.bind_local_transform();
        }
        self.update_global_transforms();
    }

    /// Propagates local transforms through the hierarchy and refreshes the
    /// final joint matrices.
    ///
    /// Bones are visited in index order; the construction invariant
    /// guarantees a parent's global transform is already updated when any
    /// child composes against it. The final matrix per bone is
    /// `global_transform * inverse_bind_matrix`.
    pub fn update_global_transforms(&mut self) {
        for i in 0..self.bones.len() {
            let global = match self.bones[i].parent_index {
                Some(p) => self.bones[p].global_transform * self.bones[i].local_transform,
                None => self.bones[i].local_transform,
            };
            self.bones[i].global_transform = global;
            self.joint_matrices[i] = Mat4::from(global * self.bones[i].inverse_bind_matrix);
        }
    }

    /// Final skinning matrices, index-aligned to [`Self::bones`].
    ///
    /// Derived data: valid for the frame of the last propagation pass.
    #[inline]
    #[must_use]
    pub fn joint_matrices(&self) -> &[Mat4] {
        &self.joint_matrices
    }
}
