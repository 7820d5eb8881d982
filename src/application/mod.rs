mod node_check_service;

pub use node_check_service::NodeCheckService;
