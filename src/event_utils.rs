use leptos::ev::EventDescriptor;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event};

struct WindowListener {
    event_name: String,
    callback: Closure<dyn FnMut(Event)>,
}

/// Passive window listeners that drive a drag gesture.
///
/// Pointer moves and releases are taken from `window` so a gesture that
/// leaves the plot still ends. The closures live until [`GestureListeners::detach`].
#[derive(Default)]
pub struct GestureListeners {
    listeners: Vec<WindowListener>,
}

impl GestureListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen<E>(&mut self, event: E, mut cb: impl FnMut(E::EventType) + 'static)
    where
        E: EventDescriptor + 'static,
        E::EventType: JsCast,
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let opts = AddEventListenerOptions::new();
        opts.set_passive(true);

        let event_name = event.name().into_owned();
        let callback = Closure::wrap(Box::new(move |ev: Event| {
            cb(ev.unchecked_into::<E::EventType>());
        }) as Box<dyn FnMut(Event)>);

        if window
            .add_event_listener_with_callback_and_add_event_listener_options(
                &event_name,
                callback.as_ref().unchecked_ref(),
                &opts,
            )
            .is_ok()
        {
            self.listeners.push(WindowListener { event_name, callback });
        }
    }

    /// Unregister every listener and drop its closure.
    pub fn detach(self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        for listener in self.listeners {
            let _ = window.remove_event_listener_with_callback(
                &listener.event_name,
                listener.callback.as_ref().unchecked_ref(),
            );
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use leptos::ev;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dispatch_keydown() {
        let event = web_sys::KeyboardEvent::new("keydown").unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn detached_listeners_stop_firing() {
        let hits = Rc::new(Cell::new(0));
        let mut listeners = GestureListeners::new();
        let counter = Rc::clone(&hits);
        listeners.listen(ev::keydown, move |_| counter.set(counter.get() + 1));

        dispatch_keydown();
        assert_eq!(hits.get(), 1);

        listeners.detach();
        dispatch_keydown();
        assert_eq!(hits.get(), 1);
    }
}
