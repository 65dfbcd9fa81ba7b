pub mod accessibility_panel;
pub mod company_card;
pub mod empty_state;
pub mod footer;
pub mod header;
pub mod job_card;
pub mod nav_link;
pub mod pagination;
pub mod skeleton;
