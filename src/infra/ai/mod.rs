pub mod http_assistant;
