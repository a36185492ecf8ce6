use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_SPEED, PROJECTILE_WIDTH};
use crate::surface::Surface;

/// One reusable shot slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub active: bool,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new()
    }
}

impl Projectile {
    /// An inactive slot parked at the origin
    pub const fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: PROJECTILE_WIDTH,
            height: PROJECTILE_HEIGHT,
            speed: PROJECTILE_SPEED,
            active: false,
        }
    }

    /// Activate with `(x, y)` as the top-center point
    pub fn start(&mut self, x: f32, y: f32) {
        self.x = x - self.width * 0.5;
        self.y = y;
        self.active = true;
    }

    /// Move up by `speed`; once fully above the playfield the slot is freed.
    /// Inactive slots are left untouched.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.y -= self.speed;
        if self.y < -self.height {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        if self.active {
            surface.fill_rect(self.x, self.y, self.width, self.height);
        }
    }
}

/// Index of a free slot returned by [`ProjectilePool::acquire`].
///
/// Consumed by [`ProjectilePool::start`], so one acquire can start at most one shot.
/// The slot is checked again when the handle is used.
#[derive(Debug, PartialEq, Eq)]
pub struct ProjectileHandle(usize);

impl ProjectileHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Fixed set of `N` projectile slots. Never allocates after construction.
#[derive(Debug, Clone)]
pub struct ProjectilePool<const N: usize> {
    slots: [Projectile; N],
}

impl<const N: usize> Default for ProjectilePool<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ProjectilePool<N> {
    pub fn new() -> Self {
        Self {
            slots: [Projectile::new(); N],
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    /// First inactive slot in index order, or `None` when every slot is in flight.
    /// Nothing is marked until [`start`](Self::start) is called.
    pub fn acquire(&self) -> Option<ProjectileHandle> {
        self.slots
            .iter()
            .position(|slot| !slot.active)
            .map(ProjectileHandle)
    }

    /// Start a shot in the handle's slot and return the slot index.
    ///
    /// Returns `None` and leaves the pool untouched when the slot went active
    /// after the acquire, or when the handle indexes past this pool's `N`.
    pub fn start(&mut self, handle: ProjectileHandle, x: f32, y: f32) -> Option<usize> {
        let slot = self.slots.get_mut(handle.0).filter(|slot| !slot.active)?;
        slot.start(x, y);
        Some(handle.0)
    }

    /// Advance every slot once. Call exactly once per frame.
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            slot.update();
        }
    }

    pub fn draw(&self, surface: &mut impl Surface) {
        for slot in &self.slots {
            slot.draw(surface);
        }
    }

    pub fn get(&self, handle: &ProjectileHandle) -> Option<&Projectile> {
        self.slots.get(handle.0)
    }

    pub fn slot(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)
    }

    /// All slots in index order, active or not
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter()
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|slot| slot.active)
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Bounds, DrawCommand, DrawList};

    #[test]
    fn test_projectile_new_is_inactive() {
        let projectile = Projectile::new();
        assert!(!projectile.active);
        assert_eq!(projectile.width, 10.0);
        assert_eq!(projectile.height, 20.0);
        assert_eq!(projectile.speed, 20.0);
    }

    #[test]
    fn test_projectile_start_centers_on_x() {
        let mut projectile = Projectile::new();
        projectile.start(300.0, 700.0);
        assert!(projectile.active);
        assert_eq!(projectile.x, 295.0);
        assert_eq!(projectile.y, 700.0);
    }

    #[test]
    fn test_projectile_moves_up() {
        let mut projectile = Projectile::new();
        projectile.start(300.0, 700.0);
        projectile.update();
        assert_eq!(projectile.y, 680.0);
    }

    #[test]
    fn test_inactive_projectile_does_not_move() {
        let mut projectile = Projectile::new();
        projectile.update();
        assert_eq!(projectile.y, 0.0);
        assert!(!projectile.active);
    }

    #[test]
    fn test_projectile_resets_only_past_top() {
        let mut projectile = Projectile::new();
        projectile.start(100.0, 20.0);
        projectile.update(); // y = 0
        assert!(projectile.active);
        projectile.update(); // y = -20, bottom edge exactly at the top
        assert!(projectile.active);
        projectile.update(); // y = -40
        assert!(!projectile.active);
    }

    #[test]
    fn test_inactive_projectile_not_drawn() {
        let mut list = DrawList::new();
        let mut projectile = Projectile::new();
        projectile.draw(&mut list);
        assert!(list.is_empty());

        projectile.start(300.0, 700.0);
        projectile.draw(&mut list);
        assert_eq!(
            list.commands(),
            &[DrawCommand::Fill(Bounds::new(295.0, 700.0, 10.0, 20.0))]
        );
    }

    #[test]
    fn test_pool_starts_empty() {
        let pool = ProjectilePool::<10>::new();
        assert_eq!(pool.capacity(), 10);
        assert_eq!(pool.active_count(), 0);
        assert_eq!(pool.iter().count(), 10);
    }

    #[test]
    fn test_acquire_does_not_mark_slot() {
        let pool = ProjectilePool::<3>::new();
        let first = pool.acquire().unwrap();
        let second = pool.acquire().unwrap();
        assert_eq!(first, second);
        assert_eq!(pool.active_count(), 0);
    }

    #[test]
    fn test_acquire_scans_in_index_order() {
        let mut pool = ProjectilePool::<3>::new();
        for expected in 0..3 {
            let handle = pool.acquire().unwrap();
            assert_eq!(handle.index(), expected);
            pool.start(handle, 50.0, 400.0);
        }
    }

    #[test]
    fn test_acquire_exhausted_returns_none() {
        let mut pool = ProjectilePool::<2>::new();
        for _ in 0..2 {
            let handle = pool.acquire().unwrap();
            pool.start(handle, 50.0, 400.0);
        }
        assert!(pool.acquire().is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_freed_slot_is_reused_first() {
        let mut pool = ProjectilePool::<3>::new();
        // slot 0 low enough to expire quickly, slots 1 and 2 far down
        let handle = pool.acquire().unwrap();
        pool.start(handle, 50.0, 0.0);
        for _ in 0..2 {
            let handle = pool.acquire().unwrap();
            pool.start(handle, 50.0, 700.0);
        }
        assert!(pool.acquire().is_none());

        pool.tick(); // slot 0: y = -20
        pool.tick(); // slot 0: y = -40, freed
        let handle = pool.acquire().unwrap();
        assert_eq!(handle.index(), 0);
    }

    #[test]
    fn test_start_refuses_slot_started_since_acquire() {
        let mut pool = ProjectilePool::<3>::new();
        let first = pool.acquire().unwrap();
        let second = pool.acquire().unwrap();
        assert_eq!(pool.start(first, 100.0, 700.0), Some(0));
        pool.tick();

        // both handles named slot 0, which is now in flight
        assert_eq!(pool.start(second, 300.0, 700.0), None);
        let shot = pool.slot(0).unwrap();
        assert_eq!(shot.x, 95.0);
        assert_eq!(shot.y, 680.0);
        assert_eq!(pool.active_count(), 1);

        let retry = pool.acquire().unwrap();
        assert_eq!(pool.start(retry, 300.0, 700.0), Some(1));
    }

    #[test]
    fn test_handle_from_larger_pool_is_ignored() {
        let mut large = ProjectilePool::<10>::new();
        for _ in 0..5 {
            let handle = large.acquire().unwrap();
            large.start(handle, 50.0, 400.0);
        }
        let handle = large.acquire().unwrap();
        assert_eq!(handle.index(), 5);

        let mut small = ProjectilePool::<3>::new();
        assert!(small.get(&handle).is_none());
        assert_eq!(small.start(handle, 300.0, 700.0), None);
        assert_eq!(small.active_count(), 0);
    }

    #[test]
    fn test_tick_twice_moves_active_by_double_speed() {
        let mut pool = ProjectilePool::<4>::new();
        let handle = pool.acquire().unwrap();
        pool.start(handle, 100.0, 500.0);
        let before: Vec<Projectile> = pool.iter().copied().collect();

        pool.tick();
        pool.tick();

        for (old, new) in before.iter().zip(pool.iter()) {
            if old.active {
                assert_eq!(new.y, old.y - 2.0 * old.speed);
            } else {
                assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_pool_draws_only_active_slots() {
        let mut pool = ProjectilePool::<5>::new();
        let handle = pool.acquire().unwrap();
        pool.start(handle, 100.0, 500.0);
        let mut list = DrawList::new();
        pool.draw(&mut list);
        assert_eq!(list.len(), 1);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_acquire_never_returns_active_slot(
                // true = fire, false = tick
                steps in prop::collection::vec(any::<bool>(), 0..200),
                start_y in 0u16..800
            ) {
                let mut pool = ProjectilePool::<10>::new();
                for fire in steps {
                    if fire {
                        if let Some(handle) = pool.acquire() {
                            prop_assert!(!pool.get(&handle).unwrap().active);
                            let index = handle.index();
                            prop_assert_eq!(pool.start(handle, 300.0, start_y as f32), Some(index));
                        } else {
                            prop_assert_eq!(pool.active_count(), 10);
                        }
                    } else {
                        pool.tick();
                    }
                    prop_assert!(pool.active_count() <= pool.capacity());
                }
            }

            #[test]
            fn test_projectile_lifetime_matches_travel(start_y in 0u16..800) {
                let y = start_y as f32;
                let mut projectile = Projectile::new();
                projectile.start(300.0, y);

                // first tick k with y - k*speed < -height
                let expected = ((y + projectile.height) / projectile.speed).floor() as u32 + 1;
                for _ in 1..expected {
                    projectile.update();
                    prop_assert!(projectile.active);
                }
                projectile.update();
                prop_assert!(!projectile.active);
            }

            #[test]
            fn test_lifetime_is_ceil_off_multiples(start_y in 0u16..800) {
                let y = start_y as f32;
                let speed = PROJECTILE_SPEED;
                let height = PROJECTILE_HEIGHT;
                prop_assume!(((y + height) % speed) != 0.0);

                let mut projectile = Projectile::new();
                projectile.start(300.0, y);
                let ticks = ((y + height) / speed).ceil() as u32;
                for _ in 0..ticks {
                    projectile.update();
                }
                prop_assert!(!projectile.active);
            }
        }
    }
}
