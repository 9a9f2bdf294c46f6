//! Dismissible side panels with overlay and background scroll locking.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerEvent {
    OpenClicked,
    CloseClicked,
    OverlayClicked,
    EscapePressed,
}

pub trait DrawerSurface {
    /// Toggle the panel and overlay markers and their `aria-hidden`.
    fn render(&self, open: bool);
    fn lock_page_scroll(&self, locked: bool);
}

/// Count of open drawers sharing the page scroll lock.
///
/// The page is unlocked only when the last holder releases.
#[derive(Debug, Clone, Default)]
pub struct ScrollLock(Rc<Cell<u32>>);

impl ScrollLock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when this call locked a previously unlocked page.
    pub fn acquire(&self) -> bool {
        let held = self.0.get();
        self.0.set(held + 1);
        held == 0
    }

    /// Returns `true` when this call released the last hold.
    pub fn release(&self) -> bool {
        match self.0.get() {
            0 => false,
            held => {
                self.0.set(held - 1);
                held == 1
            }
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.0.get() > 0
    }
}

pub struct Drawer {
    name: String,
    state: DrawerState,
    lock: ScrollLock,
    surface: Box<dyn DrawerSurface>,
}

impl Drawer {
    #[must_use]
    pub fn new(name: impl Into<String>, lock: ScrollLock, surface: Box<dyn DrawerSurface>) -> Self {
        Self {
            name: name.into(),
            state: DrawerState::Closed,
            lock,
            surface,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn state(&self) -> DrawerState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }

    /// Returns `true` when the event changed the drawer's state.
    pub fn handle(&mut self, event: DrawerEvent) -> bool {
        let next = match event {
            DrawerEvent::OpenClicked => DrawerState::Open,
            DrawerEvent::CloseClicked | DrawerEvent::OverlayClicked | DrawerEvent::EscapePressed => {
                DrawerState::Closed
            }
        };
        if next == self.state {
            return false;
        }

        self.state = next;
        let open = next == DrawerState::Open;
        self.surface.render(open);
        let lock_changed = if open {
            self.lock.acquire()
        } else {
            self.lock.release()
        };
        if lock_changed {
            self.surface.lock_page_scroll(open);
        }
        log::debug!("drawer {} is now {:?}", self.name, self.state);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Clone, Default)]
    struct Calls(Rc<RefCell<Vec<String>>>);

    impl DrawerSurface for Calls {
        fn render(&self, open: bool) {
            self.0.borrow_mut().push(format!("render:{open}"));
        }
        fn lock_page_scroll(&self, locked: bool) {
            self.0.borrow_mut().push(format!("lock:{locked}"));
        }
    }

    #[test]
    fn open_renders_and_locks() {
        let calls = Calls::default();
        let mut drawer = Drawer::new("about", ScrollLock::new(), Box::new(calls.clone()));
        assert!(drawer.handle(DrawerEvent::OpenClicked));
        assert!(drawer.is_open());
        assert_eq!(*calls.0.borrow(), vec!["render:true", "lock:true"]);
    }

    #[test]
    fn every_dismissal_path_closes() {
        for event in [
            DrawerEvent::CloseClicked,
            DrawerEvent::OverlayClicked,
            DrawerEvent::EscapePressed,
        ] {
            let mut drawer = Drawer::new("about", ScrollLock::new(), Box::new(Calls::default()));
            drawer.handle(DrawerEvent::OpenClicked);
            assert!(drawer.handle(event), "{event:?} should close");
            assert_eq!(drawer.state(), DrawerState::Closed);
        }
    }

    #[test]
    fn escape_while_closed_does_nothing() {
        let calls = Calls::default();
        let mut drawer = Drawer::new("poc", ScrollLock::new(), Box::new(calls.clone()));
        assert!(!drawer.handle(DrawerEvent::EscapePressed));
        assert!(calls.0.borrow().is_empty());
    }

    #[test]
    fn shared_lock_survives_until_last_drawer_closes() {
        let lock = ScrollLock::new();
        let about_calls = Calls::default();
        let poc_calls = Calls::default();
        let mut about = Drawer::new("about", lock.clone(), Box::new(about_calls.clone()));
        let mut poc = Drawer::new("poc", lock.clone(), Box::new(poc_calls.clone()));

        about.handle(DrawerEvent::OpenClicked);
        poc.handle(DrawerEvent::OpenClicked);
        about.handle(DrawerEvent::CloseClicked);
        assert!(lock.is_locked());
        assert_eq!(*about_calls.0.borrow(), vec!["render:true", "lock:true", "render:false"]);

        poc.handle(DrawerEvent::EscapePressed);
        assert!(!lock.is_locked());
        assert_eq!(*poc_calls.0.borrow(), vec!["render:true", "render:false", "lock:false"]);
    }

    #[test]
    fn release_without_hold_is_harmless() {
        let lock = ScrollLock::new();
        assert!(!lock.release());
        assert!(lock.acquire());
        assert!(!lock.acquire());
        assert!(!lock.release());
        assert!(lock.release());
    }
}
