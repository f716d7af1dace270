/// Declares a DTO struct and its field table.
///
/// Every field becomes `pub field: Option<Type>`, where `None` is the unset
/// state. A field may name a validator, `field: Type => path`, with the
/// signature `fn(&Type) -> Result<(), impl ToString>`; a rejection surfaces
/// as [`Error::InvalidValue`](crate::Error::InvalidValue).
///
/// ```
/// use dtokit_model::{Dto, dto};
///
/// fn non_blank(name: &String) -> Result<(), &'static str> {
///     if name.trim().is_empty() { Err("cannot be blank") } else { Ok(()) }
/// }
///
/// dto! {
///     pub struct Contact {
///         id: i64,
///         name: String => non_blank,
///     }
/// }
///
/// let contact = Contact::from_source(Some(&serde_json::json!({"name": "tangoman"}))).unwrap();
/// assert_eq!(contact.fields(), ["id", "name"]);
/// assert!(!contact.is_complete());
/// ```
#[macro_export]
macro_rules! dto {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty $(=> $validator:path)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                pub $field: ::core::option::Option<$ty>,
            )*
        }

        impl $name {
            /// Field table shared by every instance of this type.
            pub fn dto_schema() -> &'static ::std::sync::Arc<$crate::Schema<$name>> {
                static SCHEMA: ::std::sync::OnceLock<::std::sync::Arc<$crate::Schema<$name>>> =
                    ::std::sync::OnceLock::new();
                SCHEMA.get_or_init(|| {
                    let builder = $crate::Schema::<$name>::builder(stringify!($name));
                    $(
                        let builder = builder.field(
                            stringify!($field),
                            <$ty as $crate::Scalar>::KIND,
                            |dto: &$name| $crate::value::to_field_value(&dto.$field),
                            |dto: &mut $name, value| {
                                let parsed: ::core::option::Option<$ty> = $crate::value::from_field_value(
                                    stringify!($name),
                                    stringify!($field),
                                    value,
                                )?;
                                $(
                                    if let ::core::option::Option::Some(inner) = parsed.as_ref() {
                                        $validator(inner).map_err(|reason| $crate::Error::InvalidValue {
                                            owner: stringify!($name).to_string(),
                                            field: stringify!($field).to_string(),
                                            reason: ::std::string::ToString::to_string(&reason),
                                        })?;
                                    }
                                )?
                                dto.$field = parsed;
                                ::core::result::Result::Ok(())
                            },
                        );
                    )*
                    ::std::sync::Arc::new(builder.build())
                })
            }
        }

        impl $crate::Dto for $name {
            fn schema(&self) -> &::std::sync::Arc<$crate::Schema<Self>> {
                <$name>::dto_schema()
            }
        }

        impl ::core::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                $crate::Dto::equals(self, other)
            }
        }

        impl ::core::cmp::Eq for $name {}

        impl ::core::hash::Hash for $name {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                $crate::Dto::hash_fields(self, state)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::Dto::render(self))
            }
        }
    };
}
