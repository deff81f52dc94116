pub mod alarm_service;
pub mod context;
pub mod dispatcher;
pub mod spaces_service;

pub use alarm_service::AlarmForwarder;
pub use dispatcher::SpacesDispatcher;
pub use spaces_service::SpacesService;
