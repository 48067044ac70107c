pub mod amm;
