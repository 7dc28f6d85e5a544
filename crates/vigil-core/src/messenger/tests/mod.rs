#![cfg(test)]

mod queue_tests;
