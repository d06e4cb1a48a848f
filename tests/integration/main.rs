//! Whole-app integration tests, driven through the real root plugin.

mod state_transitions;
