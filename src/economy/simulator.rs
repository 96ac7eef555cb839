//! Balance simulator for Stake Clicker.
//! Run with: cargo test simulate_greedy -- --nocapture
