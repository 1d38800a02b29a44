//! Render and click notifications.
//!
//! Handlers are registered on an [`EventBus`] with [`EventBus::on_render`]
//! and [`EventBus::on_click`], or events can be received over a channel
//! from [`EventBus::subscribe_channel`]. Handlers run synchronously, in
//! registration order, on the thread that triggered the event.

use std::{rc::Rc, sync::mpsc};

use log::{debug, trace};

use termcloud_core::{annotation::AnnotationRecord, geometry::Point};

/// Pointer button that triggered an interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// The user interaction behind a click event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    position: Point,
    button: PointerButton,
}

impl Interaction {
    /// A primary-button interaction at `position`, in canvas coordinates
    /// with the origin top-left.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            button: PointerButton::Primary,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn button(&self) -> PointerButton {
        self.button
    }
}

/// Payload of a click on a placed word.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    text: String,
    records: Vec<AnnotationRecord>,
    interaction: Interaction,
}

impl ClickEvent {
    pub fn new(
        text: impl Into<String>,
        records: Vec<AnnotationRecord>,
        interaction: Interaction,
    ) -> Self {
        Self {
            text: text.into(),
            records,
            interaction,
        }
    }

    /// The clicked word
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every record behind the clicked word
    pub fn records(&self) -> &[AnnotationRecord] {
        &self.records
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }
}

/// Events delivered through [`EventBus::subscribe_channel`].
#[derive(Debug, Clone, PartialEq)]
pub enum CloudEvent {
    /// A render pass completed
    Rendered,
    /// A placed word was clicked
    Clicked(ClickEvent),
}

type RenderHandler = Rc<dyn Fn()>;
type ClickHandler = Rc<dyn Fn(&ClickEvent)>;

/// Registry of event handlers.
///
/// Cloning a bus shares the registered handlers.
///
/// # Example
///
/// ```
/// # use std::{cell::Cell, rc::Rc};
/// # use termcloud::events::EventBus;
/// let renders = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&renders);
///
/// let mut events = EventBus::new();
/// events.on_render(move || counter.set(counter.get() + 1));
/// events.emit_render();
///
/// assert_eq!(renders.get(), 1);
/// ```
#[derive(Clone, Default)]
pub struct EventBus {
    render_handlers: Vec<RenderHandler>,
    click_handlers: Vec<ClickHandler>,
    channels: Vec<mpsc::Sender<CloudEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("render_handlers", &self.render_handlers.len())
            .field("click_handlers", &self.click_handlers.len())
            .field("channels", &self.channels.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls `handler` after every completed render pass.
    pub fn on_render<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn() + 'static,
    {
        self.render_handlers.push(Rc::new(handler));
        self
    }

    /// Calls `handler` for every click on a placed word.
    pub fn on_click<F>(&mut self, handler: F) -> &mut Self
    where
        F: Fn(&ClickEvent) + 'static,
    {
        self.click_handlers.push(Rc::new(handler));
        self
    }

    /// Returns a receiver for all future events.
    ///
    /// Dropping the receiver unsubscribes it on the next event.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<CloudEvent> {
        let (sender, receiver) = mpsc::channel();
        self.channels.push(sender);
        receiver
    }

    pub fn emit_render(&mut self) {
        debug!(handlers = self.render_handlers.len(); "Emitting render event");
        for handler in &self.render_handlers {
            handler();
        }
        self.send(CloudEvent::Rendered);
    }

    pub fn emit_click(&mut self, event: ClickEvent) {
        trace!(text = event.text(), records = event.records().len(); "Emitting click event");
        for handler in &self.click_handlers {
            handler(&event);
        }
        self.send(CloudEvent::Clicked(event));
    }

    fn send(&mut self, event: CloudEvent) {
        self.channels
            .retain(|sender| sender.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use termcloud_core::annotation::Domain;

    use super::*;

    fn click() -> ClickEvent {
        ClickEvent::new(
            "swi4",
            vec![AnnotationRecord::new("GO:1", "swi4 complex", 1e-3, Domain::CC)],
            Interaction::new(Point::new(4.0, 2.0)).with_button(PointerButton::Secondary),
        )
    }

    #[test]
    fn test_click_handlers_receive_records() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut events = EventBus::new();
        events.on_click(move |event| sink.borrow_mut().push(event.records()[0].term_id().to_string()));
        events.emit_click(click());

        assert_eq!(*seen.borrow(), vec!["GO:1".to_string()]);
    }

    #[test]
    fn test_channel_receives_both_kinds() {
        let mut events = EventBus::new();
        let receiver = events.subscribe_channel();

        events.emit_render();
        events.emit_click(click());

        assert_eq!(receiver.try_recv().unwrap(), CloudEvent::Rendered);
        match receiver.try_recv().unwrap() {
            CloudEvent::Clicked(event) => {
                assert_eq!(event.text(), "swi4");
                assert_eq!(event.interaction().button(), PointerButton::Secondary);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_dropped_receivers_are_removed() {
        let mut events = EventBus::new();
        drop(events.subscribe_channel());
        events.emit_render();
        assert_eq!(events.channels.len(), 0);
    }

    #[test]
    fn test_clones_share_handlers() {
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);

        let mut events = EventBus::new();
        events.on_render(move || *counter.borrow_mut() += 1);
        let mut copy = events.clone();
        events.emit_render();
        copy.emit_render();

        assert_eq!(*count.borrow(), 2);
    }
}
