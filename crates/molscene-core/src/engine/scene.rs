use super::primitives::{CylinderDescriptor, SphereDescriptor};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

/// The interface through which a host application materializes primitives.
///
/// The import workflow calls it only after the whole file has been decoded and
/// every bond reference resolved: all spheres first, then all cylinders, each in
/// file order. Handles returned for spheres are passed back as the endpoints of
/// the cylinders that connect them.
pub trait SceneBuilder {
    /// Opaque reference to an object created in the host scene.
    type Handle: Clone;
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_sphere(&mut self, sphere: &SphereDescriptor) -> Result<Self::Handle, Self::Error>;

    fn add_cylinder(
        &mut self,
        cylinder: &CylinderDescriptor,
        from: &Self::Handle,
        to: &Self::Handle,
    ) -> Result<Self::Handle, Self::Error>;

    /// Deletes an object created earlier by this builder. Used to roll back a
    /// partially populated scene when the host fails midway.
    fn remove(&mut self, handle: &Self::Handle);
}

new_key_type! {
    pub struct ObjectId;
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneObject {
    Sphere(SphereDescriptor),
    Cylinder {
        cylinder: CylinderDescriptor,
        from: ObjectId,
        to: ObjectId,
    },
}

impl SceneObject {
    pub fn name(&self) -> &str {
        match self {
            Self::Sphere(sphere) => &sphere.name,
            Self::Cylinder { cylinder, .. } => &cylinder.name,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordingSceneError {
    #[error("Cylinder endpoint {0:?} is not a sphere in this scene")]
    UnknownEndpoint(ObjectId),
}

/// An in-memory scene that records every object it is asked to create.
#[derive(Debug, Default)]
pub struct RecordingScene {
    objects: SlotMap<ObjectId, SceneObject>,
    order: Vec<ObjectId>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.order
            .iter()
            .filter_map(|&id| self.objects.get(id).map(|obj| (id, obj)))
    }

    pub fn spheres(&self) -> impl Iterator<Item = &SphereDescriptor> {
        self.iter().filter_map(|(_, obj)| match obj {
            SceneObject::Sphere(sphere) => Some(sphere),
            SceneObject::Cylinder { .. } => None,
        })
    }

    pub fn cylinders(&self) -> impl Iterator<Item = &CylinderDescriptor> {
        self.iter().filter_map(|(_, obj)| match obj {
            SceneObject::Cylinder { cylinder, .. } => Some(cylinder),
            SceneObject::Sphere(_) => None,
        })
    }

    fn insert(&mut self, object: SceneObject) -> ObjectId {
        let id = self.objects.insert(object);
        self.order.push(id);
        id
    }

    fn check_sphere(&self, id: ObjectId) -> Result<(), RecordingSceneError> {
        match self.objects.get(id) {
            Some(SceneObject::Sphere(_)) => Ok(()),
            _ => Err(RecordingSceneError::UnknownEndpoint(id)),
        }
    }
}

impl SceneBuilder for RecordingScene {
    type Handle = ObjectId;
    type Error = RecordingSceneError;

    fn add_sphere(&mut self, sphere: &SphereDescriptor) -> Result<ObjectId, Self::Error> {
        Ok(self.insert(SceneObject::Sphere(sphere.clone())))
    }

    fn add_cylinder(
        &mut self,
        cylinder: &CylinderDescriptor,
        from: &ObjectId,
        to: &ObjectId,
    ) -> Result<ObjectId, Self::Error> {
        self.check_sphere(*from)?;
        self.check_sphere(*to)?;
        Ok(self.insert(SceneObject::Cylinder {
            cylinder: cylinder.clone(),
            from: *from,
            to: *to,
        }))
    }

    fn remove(&mut self, handle: &ObjectId) {
        if self.objects.remove(*handle).is_some() {
            self.order.retain(|id| id != handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::topology::Bond;
    use crate::engine::primitives::{build_cylinder, build_sphere};
    use nalgebra::Point3;

    fn pair() -> (SphereDescriptor, SphereDescriptor, CylinderDescriptor) {
        let a = Atom::new(1, "C", 2, Point3::new(0.0, 0.0, 0.0), 0);
        let b = Atom::new(2, "H", 3, Point3::new(1.1, 0.0, 0.0), 0);
        let cyl = build_cylinder(&Bond::new(1, 2, 1, 5), 1, &a, &b, 0.4);
        (build_sphere(&a, 1.0), build_sphere(&b, 1.0), cyl)
    }

    #[test]
    fn records_objects_in_creation_order() {
        let (s1, s2, cyl) = pair();
        let mut scene = RecordingScene::new();
        let a = scene.add_sphere(&s1).unwrap();
        let b = scene.add_sphere(&s2).unwrap();
        let c = scene.add_cylinder(&cyl, &a, &b).unwrap();

        let names: Vec<_> = scene.iter().map(|(_, obj)| obj.name().to_string()).collect();
        assert_eq!(names, ["C2", "H3", "bond_C2-H3"]);
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.spheres().count(), 2);
        assert_eq!(scene.cylinders().count(), 1);
        match scene.get(c) {
            Some(SceneObject::Cylinder { from, to, .. }) => {
                assert_eq!((*from, *to), (a, b));
            }
            other => panic!("unexpected object: {other:?}"),
        }
    }

    #[test]
    fn cylinder_endpoints_must_be_spheres() {
        let (s1, s2, cyl) = pair();
        let mut scene = RecordingScene::new();
        let a = scene.add_sphere(&s1).unwrap();
        let b = scene.add_sphere(&s2).unwrap();
        let c = scene.add_cylinder(&cyl, &a, &b).unwrap();

        assert_eq!(
            scene.add_cylinder(&cyl, &a, &c),
            Err(RecordingSceneError::UnknownEndpoint(c))
        );
    }

    #[test]
    fn remove_deletes_object_and_its_order_entry() {
        let (s1, s2, _) = pair();
        let mut scene = RecordingScene::new();
        let a = scene.add_sphere(&s1).unwrap();
        let b = scene.add_sphere(&s2).unwrap();

        scene.remove(&a);
        assert_eq!(scene.len(), 1);
        assert!(scene.get(a).is_none());
        assert_eq!(scene.iter().map(|(id, _)| id).collect::<Vec<_>>(), [b]);

        scene.remove(&a);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn new_scene_is_empty() {
        let scene = RecordingScene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.iter().count(), 0);
    }
}
