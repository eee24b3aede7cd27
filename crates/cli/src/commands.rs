/// Report generation for the `github`, `confluence` and `all` commands
pub mod report;
