pub mod subsequence;
