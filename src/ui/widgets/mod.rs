pub mod sparkline;
