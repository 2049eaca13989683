//! # CLI Module
//!
//! Command-line interface behind the `oapi-lambda-gen` binary.
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Run the external generator for a client or server:
//!
//! ```bash
//! oapi-lambda-gen generate client colors-api.yaml
//! oapi-lambda-gen generate server colors-api.yaml --root . --dry-run
//! ```
//!
//! Servers additionally receive `generated/server/lambda/{package.json,tsconfig.json,index.ts}`.
//!
//! ### `routes`
//!
//! ```bash
//! oapi-lambda-gen routes --spec colors-api.yaml
//! ```
//!
//! ### `match`
//!
//! ```bash
//! oapi-lambda-gen match --spec colors-api.yaml GET /colors/42
//! ```
//!
//! ### `invoke`
//!
//! Feed an API Gateway proxy event through stub handlers:
//!
//! ```bash
//! echo '{"httpMethod":"GET","path":"/colors"}' | oapi-lambda-gen invoke --spec colors-api.yaml
//! ```

mod commands;


pub use commands::{invoke, print_match, print_routes, run_cli, Cli, Commands};
