pub mod ordinal;
