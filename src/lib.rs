pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod idl;
pub mod pda;
pub mod price;
pub mod reader;
pub mod schema;
pub mod seeds;
pub mod state;

solana_program::declare_id!("DBHmndyfN4j7BtQsLaCR1SPd7iAXaf1ezUicDs3pUXS8");
