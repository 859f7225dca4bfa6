//! Direct messaging outside the dispatch table

mod service;

pub use service::MessagingService;
