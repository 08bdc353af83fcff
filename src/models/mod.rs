pub mod event;

pub use event::{
    CreateEventRequest, Event, EventCategory, EventDocument, EventPatch, NewEvent,
    UpdateEventRequest,
};
