//! Integration Tests Module
//!
//! End-to-end tests for the Skyforge core engine, all running against an
//! in-memory SQLite store. Tests cover the metric diagnosis pipeline, the
//! workspace memory lifecycle, weekly review generation, and the advisor
//! conversation flow.

// Metric persistence, aggregation and bottleneck diagnosis tests
mod diagnosis_flow_test;

// Workspace memory write/retrieve lifecycle tests
mod memory_flow_test;

// Weekly review generation and persistence tests
mod review_flow_test;

// Advisor prompt assembly, reply parsing and memory capture tests
mod advisor_flow_test;
