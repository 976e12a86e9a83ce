use proc_macro::{self, TokenStream};
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

///
/// A derive macro which implements TryFrom<u8> for a fieldless enum.
///
/// Each variant is matched against its own discriminant, so explicit
/// discriminants with gaps are fine. Unknown bytes produce
/// `crate::Error::InvalidData`.
///
/// usage:
/// ```ignore
/// #[derive(TryFromByte)]
/// ```
///
#[proc_macro_derive(TryFromByte)]
pub fn try_from_byte(input: TokenStream) -> TokenStream {
    let DeriveInput { ident, data, .. } = parse_macro_input!(input);
    let variants = match data {
        Data::Enum(enum_item) => enum_item
            .variants
            .into_iter()
            .map(|variant| variant.ident)
            .collect::<Vec<_>>(),
        _ => panic!("TryFromByte only works on Enums"),
    };
    let name = ident.to_string();
    let output = quote! {
        impl ::std::convert::TryFrom<u8> for #ident {
            type Error = crate::Error;
            fn try_from(x: u8) -> ::std::result::Result<Self, Self::Error> {
                #(
                    if x == #ident::#variants as u8 {
                        return Ok(#ident::#variants);
                    }
                )*
                Err(crate::Error::InvalidData(format!("invalid {} value {}", #name, x)))
            }
        }
    };
    output.into()
}

///
/// A derive macro which implements the canonical `Marshal` and `Unmarshal`
/// codec traits for a struct with named fields.
///
/// Fields are written and read strictly in declaration order, so the
/// declaration order of a deriving struct IS its wire order. Every field
/// error is wrapped with an `encode Type.field` / `decode Type.field`
/// breadcrumb.
///
/// usage:
/// ```ignore
/// #[derive(Marshal)]
/// pub struct AssetAmount {
///     pub amount: i64,
///     pub asset_id: AssetId,
/// }
/// ```
///
#[proc_macro_derive(Marshal)]
pub fn marshal(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident,
        data,
        generics,
        ..
    } = parse_macro_input!(input);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = match data {
        Data::Struct(data_struct) => match data_struct.fields {
            Fields::Named(named) => named
                .named
                .into_iter()
                .filter_map(|field| field.ident)
                .collect::<Vec<_>>(),
            Fields::Unit => vec![],
            Fields::Unnamed(_) => {
                return syn::Error::new_spanned(
                    &ident,
                    "Marshal can only be derived for structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&ident, "Marshal can only be derived for structs")
                .to_compile_error()
                .into();
        }
    };

    let encode_fields = fields.iter().map(|field| {
        let context = format!("encode {}.{}", ident, field);
        quote! {
            crate::codec::Marshal::marshal(&self.#field, enc).map_err(|e| e.context(#context))?;
        }
    });
    let decode_fields = fields.iter().map(|field| {
        let context = format!("decode {}.{}", ident, field);
        quote! {
            #field: crate::codec::Unmarshal::unmarshal(dec).map_err(|e| e.context(#context))?,
        }
    });

    let output = quote! {
        impl #impl_generics crate::codec::Marshal for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn marshal<W: ::std::io::Write>(
                &self,
                enc: &mut crate::codec::Encoder<W>,
            ) -> crate::Result<()> {
                #(#encode_fields)*
                Ok(())
            }
        }

        impl #impl_generics crate::codec::Unmarshal for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn unmarshal<R: ::std::io::Read>(
                dec: &mut crate::codec::Decoder<R>,
            ) -> crate::Result<Self> {
                Ok(#ident {
                    #(#decode_fields)*
                })
            }
        }
    };
    output.into()
}
