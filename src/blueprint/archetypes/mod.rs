mod container_blueprint;

pub use container_blueprint::ContainerBlueprint;
