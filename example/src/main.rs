use ::std::rc::Rc;

use ::keysmith::simulator::{EventKind, KeyEvent, Simulator};
use ::keysmith::target::{EventTarget, View};
use ::parking_lot::RwLock;
use ::tracing::info;
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// An in-memory text box which appends the value of every printable
/// key-down event dispatched to it, the way a real input field would.
struct TextBox {
    text: RwLock<String>,
}

impl TextBox {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            text: RwLock::new(String::new()),
        })
    }

    fn text(&self) -> String {
        self.text.read().clone()
    }
}

impl EventTarget for TextBox {
    fn dispatch_event(&self, event: &KeyEvent) -> bool {
        // Multi-character values ("Control", "ArrowLeft", ...) are control
        // keys, and chord presses edit rather than type.
        let printable = event.value.chars().count() == 1
            && !event.ctrl_key
            && !event.alt_key
            && !event.meta_key;

        if event.kind == EventKind::KeyDown && printable {
            self.text.write().push_str(event.value);
        }
        true
    }
}

/// A one-element screen: the text box is both the focused element and the
/// fallback root.
struct Screen {
    text_box: Rc<TextBox>,
}

impl View for Screen {
    fn focused_target(&self) -> Option<Rc<dyn EventTarget>> {
        Some(self.text_box.clone())
    }

    fn default_target(&self) -> Rc<dyn EventTarget> {
        self.text_box.clone()
    }
}

pub fn main() {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let text_box = TextBox::new();
    let screen = Rc::new(Screen {
        text_box: text_box.clone(),
    });
    let mut sim = Simulator::new(screen);

    // Type "Hello, world!" the way a person would: shift chords for the
    // capital letter and the exclamation mark.
    sim.press("Shift").expect("Failed to press Shift");
    sim.tap("H").expect("Failed to tap H");
    sim.release("Shift").expect("Failed to release Shift");
    sim.tap_keys(["E", "L", "L", "O", "Comma", "Space"])
        .expect("Failed to type letters");
    sim.tap_keys(["W", "O", "R", "L", "D"])
        .expect("Failed to type letters");
    sim.press("Shift").expect("Failed to press Shift");
    sim.tap("1").expect("Failed to tap 1");
    sim.release("Shift").expect("Failed to release Shift");
    info!(text = %text_box.text(), "Typed a greeting");

    // Auto-repeat: one held key, several repeat-flagged events.
    sim.hold("Period", 3).expect("Failed to hold Period");
    sim.release("Period").expect("Failed to release Period");
    info!(text = %text_box.text(), "Held a key");

    // The numpad obeys NumLock: digits while it is on, navigation values
    // (which the text box ignores) once it is off.
    sim.tap_keys(["Np4", "Np2"]).expect("Failed to tap numpad keys");
    sim.tap("NumLock").expect("Failed to toggle NumLock");
    sim.tap_keys(["Np4", "Np2"]).expect("Failed to tap numpad keys");
    info!(text = %text_box.text(), "Typed on the numpad");

    // A shortcut chord: Ctrl+A pressed in order, released in reverse. The
    // text box sees the events but types nothing.
    let (downs, ups) = sim.combine(["Ctrl", "A"]).expect("Failed to send Ctrl+A");
    info!(?downs, ?ups, "Dispatched a shortcut chord");

    sim.reset();
    println!("typed: {}", text_box.text());
}
