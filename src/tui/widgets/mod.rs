pub mod courses;
pub mod login;
pub mod question;
pub mod results;
