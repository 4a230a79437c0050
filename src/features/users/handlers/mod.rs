pub mod user_handler;

pub use user_handler::{
    __path_get_user, __path_login, __path_register, get_user, login, register,
};
