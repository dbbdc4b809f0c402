pub mod rewrite_service;
