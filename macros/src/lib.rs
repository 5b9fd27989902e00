//! Derive macros for the ComixEd front-end state architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `comixed_core::action::Action` for an action enum
//!
//! # Example
//!
//! ```ignore
//! use comixed_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum AuthAction {
//!     #[action("[Authentication] Check State")]
//!     CheckState,
//!
//!     #[action("[Authentication] Set Token")]
//!     SetToken { token: String },
//!
//!     // No attribute: the label is the variant name
//!     HideLogin,
//! }
//!
//! assert_eq!(AuthAction::CheckState.action_type(), "[Authentication] Check State");
//! assert_eq!(AuthAction::HideLogin.action_type(), "HideLogin");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for action enums
///
/// Generates:
/// - an inherent `action_type()` returning the variant's type label
/// - an `impl comixed_core::action::Action` delegating to it
///
/// # Attributes
///
/// - `#[action("[Slice] Label")]` - Sets the type label of a variant.
///   Variants without the attribute use their own name.
///
/// # Errors
///
/// Produces a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - The `#[action]` argument is not a string literal
/// - Two variants declare the same label
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut seen = std::collections::HashSet::new();
    let mut arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let label = match action_label(&variant.attrs) {
            Ok(Some(label)) => label,
            Ok(None) => variant_name.to_string(),
            Err(error) => return error.to_compile_error().into(),
        };

        if !seen.insert(label.clone()) {
            return syn::Error::new_spanned(
                variant,
                format!("duplicate action type label \"{label}\""),
            )
            .to_compile_error()
            .into();
        }

        let arm = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } => #label, },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) => #label, },
            Fields::Unit => quote! { Self::#variant_name => #label, },
        };
        arms.push(arm);
    }

    let body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
        }
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Returns the type label of this action
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                #body
            }
        }

        impl #impl_generics ::comixed_core::action::Action for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                #name::action_type(self)
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads the label from an `#[action("...")]` attribute, if present
fn action_label(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if attr.path().is_ident("action") {
            let label: LitStr = attr.parse_args()?;
            return Ok(Some(label.value()));
        }
    }
    Ok(None)
}
