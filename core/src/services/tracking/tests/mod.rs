//! Tests for the phone and IP trackers

#[cfg(test)]
mod concurrency_tests;
#[cfg(test)]
mod ip_tracker_tests;
#[cfg(test)]
mod phone_tracker_tests;
