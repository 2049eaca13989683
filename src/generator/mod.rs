//! # Generator Module
//!
//! Front-end for the external OpenAPI generator. It builds and runs the
//! generator command for a TypeScript client or NestJS server and, for
//! servers, post-processes the result into a deployable Lambda package.
//!
//! ## Generation Flow
//!
//! ```text
//! generate server colors-api.yaml
//!   ├─ load_spec + build RequestRouter   (fail fast on a bad route table)
//!   ├─ <root>/generated/server           (created, then emptied)
//!   ├─ openapi-generator-cli generate -g typescript-nestjs ...
//!   └─ <root>/generated/server/lambda/
//!        ├─ package.json                 (templates/package.json)
//!        ├─ tsconfig.json                (templates/tsconfig.json)
//!        └─ index.ts                     (templates/index.ts)
//! ```
//!
//! The generated `index.ts` carries the same first-match routing rules as
//! [`RequestRouter`](crate::router::RequestRouter).
//!
//! Templates are compiled in with Askama; the generator itself is located
//! through [`GeneratorConfig`](crate::config::GeneratorConfig).

mod command;
mod project;
mod templates;

pub use command::{additional_properties, npm_name, GenerationKind, GeneratorInvocation};
pub use project::{generate_project, GenerateOptions, GenerationReport, LAMBDA_DIR};
pub use templates::{
    handler_fn_name, render_lambda_handler, render_package_json, render_tsconfig, spec_stem,
    title_case_project, write_lambda_package, HandlerRoute, LambdaHandlerTemplate,
    PackageJsonTemplate, TsconfigTemplate,
};
