//! Unit tests for the auth service
