// clinical_access/src/purposes/mod.rs

pub mod purpose_catalog;

pub use purpose_catalog::{
    purposes_for_role, selectable_purposes, spec_for, PurposeDeclaration, PurposeSpec,
};
