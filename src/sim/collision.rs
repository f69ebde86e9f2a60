//! Collision resolution
//!
//! Overlap tests live on [`Rect`]; this module turns overlaps into damage,
//! destruction and respawns. The character only ever tests the nearest
//! obstacle (the back of the queue), while fired items test every obstacle.

use std::collections::VecDeque;

use super::character::{Character, LifeStatus};
use super::geometry::Rect;
use super::item::Item;
use super::obstacle::Obstacle;
use crate::consts::CHARACTER_DAMAGE;

/// Result of a fired item's collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileHit {
    Miss,
    /// Struck an obstacle that resisted; the item is still consumed
    Deflected { obstacle: u32 },
    Destroyed { obstacle: u32 },
}

/// Character vs the nearest obstacle.
///
/// On contact the character takes one hit and the obstacle is removed from
/// the queue without consulting its resistance rule. Returns the obstacle id
/// and the resulting life status.
pub fn resolve_obstacle_contact(
    character: &mut Character,
    obstacles: &mut VecDeque<Obstacle>,
) -> Option<(u32, LifeStatus)> {
    let hitbox = character.hitbox();
    let nearest = obstacles.back().filter(|o| o.exists)?;
    if !nearest.hits_character(&hitbox) {
        return None;
    }

    let id = nearest.id;
    obstacles.pop_back();
    let status = character.take_damage(CHARACTER_DAMAGE);
    log::debug!("Character hit obstacle {}", id);
    Some((id, status))
}

/// Character vs the play area. Leaving it costs one hit and, if the
/// character survives, a respawn.
pub fn resolve_bounds(character: &mut Character, bounds: &Rect) -> Option<LifeStatus> {
    if character.hitbox().intersects(bounds) {
        return None;
    }

    let status = character.take_damage(CHARACTER_DAMAGE);
    if status == LifeStatus::Alive {
        character.respawn();
    }
    log::debug!("Character left the play area ({:?})", status);
    Some(status)
}

/// Fired item vs every live obstacle, stopping at the first hit.
///
/// Any hit consumes the item. Whether the obstacle goes down is up to its
/// resistance rule.
pub fn resolve_projectile(item: &mut Item, obstacles: &mut VecDeque<Obstacle>) -> ProjectileHit {
    if !item.fired || !item.exists {
        return ProjectileHit::Miss;
    }

    let hitbox = item.hitbox();
    let Some(obstacle) = obstacles
        .iter_mut()
        .find(|o| o.exists && o.struck_by(&hitbox))
    else {
        return ProjectileHit::Miss;
    };

    item.exists = false;
    if obstacle.take_damage(item.kind) {
        log::debug!("{:?} bounced off obstacle {}", item.kind, obstacle.id);
        ProjectileHit::Deflected {
            obstacle: obstacle.id,
        }
    } else {
        log::debug!("{:?} destroyed obstacle {}", item.kind, obstacle.id);
        ProjectileHit::Destroyed {
            obstacle: obstacle.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::character::LifeBar;
    use crate::sim::item::ItemKind;
    use crate::sim::obstacle::ObstacleKind;

    fn character(lives: u32) -> Character {
        Character::new(LifeBar::new(lives).unwrap())
    }

    fn obstacle_at(id: u32, kind: ObstacleKind, x: f32, gap_start: f32) -> Obstacle {
        let mut obstacle = Obstacle::new(id, kind, gap_start, 1.0);
        obstacle.x = x;
        obstacle
    }

    fn fired(kind: ItemKind, x: f32, y: f32) -> Item {
        let mut item = Item::new(99, kind, y, 1.0);
        item.pos.x = x;
        item.pick_up();
        item.fire();
        item
    }

    fn screen() -> Rect {
        Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    #[test]
    fn test_contact_with_nearest_damages_and_removes() {
        let mut c = character(3);
        // Gap 100..268 is well above the character at y 327..372
        let mut obstacles = VecDeque::from(vec![
            obstacle_at(2, ObstacleKind::Plain, 600.0, 100.0),
            obstacle_at(1, ObstacleKind::Plain, 180.0, 100.0),
        ]);

        let hit = resolve_obstacle_contact(&mut c, &mut obstacles);
        assert_eq!(hit, Some((1, LifeStatus::Alive)));
        assert_eq!(c.life.lives(), 2);
        assert_eq!(obstacles.len(), 1);
        assert_eq!(obstacles[0].id, 2);
    }

    #[test]
    fn test_only_nearest_obstacle_is_tested() {
        let mut c = character(3);
        // The front (newest) obstacle overlaps, the back one is far away
        let mut obstacles = VecDeque::from(vec![
            obstacle_at(2, ObstacleKind::Plain, 180.0, 100.0),
            obstacle_at(1, ObstacleKind::Plain, 900.0, 100.0),
        ]);
        assert_eq!(resolve_obstacle_contact(&mut c, &mut obstacles), None);
        assert_eq!(c.life.lives(), 3);
    }

    #[test]
    fn test_character_ignores_resistance() {
        let mut c = character(3);
        let mut obstacles = VecDeque::from(vec![obstacle_at(1, ObstacleKind::Resistant, 180.0, 100.0)]);
        assert!(resolve_obstacle_contact(&mut c, &mut obstacles).is_some());
        assert!(obstacles.is_empty());
    }

    #[test]
    fn test_through_the_gap_is_safe() {
        let mut c = character(3);
        c.set_centre_y(184.0);
        let mut obstacles = VecDeque::from(vec![obstacle_at(1, ObstacleKind::Plain, 180.0, 100.0)]);
        assert_eq!(resolve_obstacle_contact(&mut c, &mut obstacles), None);
    }

    #[test]
    fn test_empty_queue_is_a_miss() {
        let mut c = character(3);
        let mut obstacles = VecDeque::new();
        assert_eq!(resolve_obstacle_contact(&mut c, &mut obstacles), None);
    }

    #[test]
    fn test_out_of_bounds_respawns_survivor() {
        let mut c = character(3);
        c.pos.y = SCREEN_HEIGHT + 5.0;
        c.velocity = 10.0;
        assert_eq!(resolve_bounds(&mut c, &screen()), Some(LifeStatus::Alive));
        assert_eq!(c.centre().y, CHARACTER_SPAWN_CENTRE_Y);
        assert_eq!(c.velocity, 0.0);
        assert_eq!(c.life.lives(), 2);
    }

    #[test]
    fn test_out_of_bounds_on_last_life_kills() {
        let mut c = character(1);
        c.pos.y = -100.0;
        assert_eq!(resolve_bounds(&mut c, &screen()), Some(LifeStatus::Dead));
        assert!(!c.is_alive());
        // No respawn for the dead
        assert_eq!(c.pos.y, -100.0);
    }

    #[test]
    fn test_inside_bounds_is_untouched() {
        let mut c = character(3);
        assert_eq!(resolve_bounds(&mut c, &screen()), None);
    }

    #[test]
    fn test_rock_against_steel_is_consumed() {
        let mut obstacles = VecDeque::from(vec![obstacle_at(7, ObstacleKind::Resistant, 400.0, 300.0)]);
        let mut rock = fired(ItemKind::Rock, 390.0, 100.0);
        assert_eq!(
            resolve_projectile(&mut rock, &mut obstacles),
            ProjectileHit::Deflected { obstacle: 7 }
        );
        assert!(!rock.exists);
        assert!(obstacles[0].exists);
    }

    #[test]
    fn test_bomb_destroys_steel() {
        let mut obstacles = VecDeque::from(vec![obstacle_at(7, ObstacleKind::Resistant, 400.0, 300.0)]);
        let mut bomb = fired(ItemKind::Bomb, 390.0, 600.0);
        assert_eq!(
            resolve_projectile(&mut bomb, &mut obstacles),
            ProjectileHit::Destroyed { obstacle: 7 }
        );
        assert!(!bomb.exists);
        assert!(!obstacles[0].exists);
    }

    #[test]
    fn test_projectile_tests_every_obstacle() {
        let mut obstacles = VecDeque::from(vec![
            obstacle_at(2, ObstacleKind::Plain, 800.0, 300.0),
            obstacle_at(1, ObstacleKind::Plain, 100.0, 300.0),
        ]);
        let mut rock = fired(ItemKind::Rock, 790.0, 100.0);
        assert_eq!(
            resolve_projectile(&mut rock, &mut obstacles),
            ProjectileHit::Destroyed { obstacle: 2 }
        );
    }

    #[test]
    fn test_projectile_in_gap_misses() {
        let mut obstacles = VecDeque::from(vec![obstacle_at(1, ObstacleKind::Plain, 400.0, 300.0)]);
        let mut rock = fired(ItemKind::Rock, 390.0, 350.0);
        assert_eq!(resolve_projectile(&mut rock, &mut obstacles), ProjectileHit::Miss);
        assert!(rock.exists);
    }

    #[test]
    fn test_unfired_item_never_strikes() {
        let mut obstacles = VecDeque::from(vec![obstacle_at(1, ObstacleKind::Plain, 400.0, 300.0)]);
        let mut rock = Item::new(1, ItemKind::Rock, 100.0, 1.0);
        rock.pos.x = 390.0;
        assert_eq!(resolve_projectile(&mut rock, &mut obstacles), ProjectileHit::Miss);
        assert!(obstacles[0].exists);
    }
}
