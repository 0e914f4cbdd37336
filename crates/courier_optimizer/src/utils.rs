pub mod id_newtype;
pub mod time;
