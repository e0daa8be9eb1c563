//! `define_port_error!` builds the typed error enums that driven ports return.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! `String` fields accept anything `Into<String>`, so adapters can write
//! `TagPersistenceError::query(err.to_string())`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor and message coverage for generated port errors.
    define_port_error! {
        /// Failures a recipe store might report.
        pub enum RecipeStoreError {
            Unreachable { message: String } => "recipe store unreachable: {message}",
            TooManyTags { count: u32 } => "recipe has {count} tags",
            Rejected { title: String, count: u32 } => "recipe {title} rejected after {count} tries",
            Closed => "recipe store closed",
        }
    }

    #[test]
    fn string_fields_take_str_slices() {
        let err = RecipeStoreError::unreachable("connection reset");
        assert_eq!(err.to_string(), "recipe store unreachable: connection reset");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = RecipeStoreError::too_many_tags(12_u32);
        assert_eq!(err, RecipeStoreError::TooManyTags { count: 12 });
        assert_eq!(err.to_string(), "recipe has 12 tags");
    }

    #[test]
    fn mixed_fields_are_forwarded_in_order() {
        let err = RecipeStoreError::rejected("Pancakes", 3_u32);
        assert_eq!(err.to_string(), "recipe Pancakes rejected after 3 tries");
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(RecipeStoreError::closed(), RecipeStoreError::Closed);
        assert_eq!(RecipeStoreError::closed().to_string(), "recipe store closed");
    }
}
