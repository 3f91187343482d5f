pub mod userlog;
