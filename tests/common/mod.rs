pub mod mock_backend;
