pub mod europeancall;
