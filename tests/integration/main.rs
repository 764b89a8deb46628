//! Integration tests: full desk flow through the public API.

mod desk_flow;
mod mock_price;
