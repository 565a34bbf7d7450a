// Domain-specific error types
pub mod errors;

// Experiment tracking records
pub mod experiment;

// Feature schema shared by client, server and evaluation
pub mod ml;

// Model evaluation metrics
pub mod performance;

// Port interfaces
pub mod ports;

// Repository traits
pub mod repositories;

// Display-only valuation breakdown
pub mod valuation;

// Car details as entered in the form
pub mod vehicle;
