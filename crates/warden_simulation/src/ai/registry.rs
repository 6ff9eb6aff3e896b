//! Candidate registry: общий упорядоченный список follow кандидатов
//!
//! Заполняется внешней системой по тегу `Followable`. AI только читает.

use bevy::prelude::*;

use crate::components::Followable;

/// Followable entity в порядке появления тега
#[derive(Resource, Debug, Default, Clone)]
pub struct CandidateRegistry {
    targets: Vec<Entity>,
}

impl CandidateRegistry {
    pub fn register(&mut self, entity: Entity) {
        if !self.targets.contains(&entity) {
            self.targets.push(entity);
        }
    }

    pub fn unregister(&mut self, entity: Entity) {
        self.targets.retain(|&target| target != entity);
    }

    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }
}

/// Система: синхронизирует registry с тегом `Followable`
///
/// Новые entities дописываются в конец: между кадрами порядок = порядок тегирования.
///
/// Despawn тоже попадает в `RemovedComponents`, так что мёртвые handles не копятся.
pub fn track_followables(
    mut registry: ResMut<CandidateRegistry>,
    added: Query<Entity, Added<Followable>>,
    mut removed: RemovedComponents<Followable>,
) {
    for entity in removed.read() {
        registry.unregister(entity);
    }

    // Порядок `Added` (в таблице = порядок вставки), не entity index:
    // index переиспользуется после despawn
    for entity in added.iter() {
        registry.register(entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_order_and_ignores_duplicates() {
        let mut registry = CandidateRegistry::default();
        let a = Entity::from_raw(3);
        let b = Entity::from_raw(1);

        registry.register(a);
        registry.register(b);
        registry.register(a);
        assert_eq!(registry.targets(), &[a, b]);

        registry.unregister(a);
        assert_eq!(registry.targets(), &[b]);
    }

    #[test]
    fn test_track_followables_follows_tag_lifecycle() {
        let mut app = App::new();
        app.init_resource::<CandidateRegistry>();
        app.add_systems(Update, track_followables);

        let first = app.world_mut().spawn(Followable).id();
        let second = app.world_mut().spawn(Followable).id();
        app.world_mut().spawn_empty();
        app.update();

        assert_eq!(app.world().resource::<CandidateRegistry>().targets(), &[first, second]);

        app.world_mut().despawn(first);
        app.world_mut().entity_mut(second).remove::<Followable>();
        app.update();

        assert!(app.world().resource::<CandidateRegistry>().targets().is_empty());
    }

    #[test]
    fn test_reused_index_does_not_jump_the_queue() {
        let mut app = App::new();
        app.init_resource::<CandidateRegistry>();
        app.add_systems(Update, track_followables);

        let old_a = app.world_mut().spawn(Followable).id();
        let old_b = app.world_mut().spawn(Followable).id();
        app.update();

        // Индексы old_a и old_b переиспользуются
        app.world_mut().despawn(old_a);
        app.world_mut().despawn(old_b);
        let first = app.world_mut().spawn(Followable).id();
        let second = app.world_mut().spawn(Followable).id();
        app.update();

        assert_eq!(app.world().resource::<CandidateRegistry>().targets(), &[first, second]);
    }
}
