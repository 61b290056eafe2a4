use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities, in draw order.
///
/// Every active entity with a sprite produces an instance, including culled ones
/// (emitted with `visible = 0` so the host hides rather than forgets them).
/// Returns the number of instances dropped because the buffer was full.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
) -> usize {
    buffer.clear();
    let mut dropped = 0;

    for entity in entities {
        if !entity.active {
            continue;
        }

        let sprite = match &entity.sprite {
            Some(s) => s,
            None => continue,
        };

        let instance = RenderInstance {
            x: entity.screen.x,
            y: entity.screen.y,
            diameter: entity.diameter,
            rotation: entity.rotation,
            class: sprite.class.0 as f32,
            visible: if entity.visible { 1.0 } else { 0.0 },
            flagged: if sprite.flagged { 1.0 } else { 0.0 },
            id: entity.id.as_f32(),
        };

        if !buffer.push(instance) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!("render buffer full ({}), dropped {dropped} instances", buffer.capacity());
    }
    dropped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::sprite::{SpriteClass, SpriteComponent};
    use glam::Vec2;

    #[test]
    fn build_buffer_copies_screen_state() {
        let mut entity = Entity::new(EntityId(7))
            .with_diameter(12.0)
            .with_sprite(SpriteComponent::new(SpriteClass(2)).flagged(true));
        entity.place(Vec2::new(1000.0, 1000.0), Vec2::new(10.0, 20.0), true);

        let entities = vec![entity];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);

        let inst = buffer.instances()[0];
        assert_eq!((inst.x, inst.y), (10.0, 20.0));
        assert_eq!(inst.diameter, 12.0);
        assert_eq!(inst.class, 2.0);
        assert_eq!(inst.flagged, 1.0);
        assert_eq!(inst.id, 7.0);
        assert!(inst.is_visible());
    }

    #[test]
    fn hidden_entities_are_emitted_invisible() {
        let mut hidden = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        hidden.visible = false;
        let shown = Entity::new(EntityId(2)).with_sprite(SpriteComponent::default());

        let entities = vec![hidden, shown];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.visible_count(), 1);
    }

    #[test]
    fn inactive_and_spriteless_entities_are_skipped() {
        let mut inactive = Entity::new(EntityId(1)).with_sprite(SpriteComponent::default());
        inactive.active = false;
        let bare = Entity::new(EntityId(2));

        let entities = vec![inactive, bare];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }

    #[test]
    fn overflow_is_reported() {
        let entities: Vec<Entity> = (1..=3)
            .map(|i| Entity::new(EntityId(i)).with_sprite(SpriteComponent::default()))
            .collect();
        let mut buffer = RenderBuffer::with_capacity(2);
        assert_eq!(build_render_buffer(entities.iter(), &mut buffer), 1);
    }
}
