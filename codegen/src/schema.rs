use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Error, Result};

pub(crate) fn imp(input: TokenStream) -> Result<TokenStream> {
    let inputs: Inputs = syn::parse2(input)?;

    let mut output = TokenStream::new();

    for Input { crate_name, meta, vis, ident, opts, components, .. } in inputs.0 {
        let crate_name = match crate_name {
            Some(crate_name) => crate_name,
            None => quote!(::satchel),
        };

        let mut index_ty = None;
        for opt in opts {
            match opt {
                Opt::Index(name, ty) => {
                    if index_ty.is_some() {
                        return Err(Error::new_spanned(name, "Duplicate argument `index`"));
                    }
                    index_ty = Some(ty.into_token_stream());
                }
            }
        }
        let index_ty = index_ty.unwrap_or_else(|| quote!(u32));

        let systems_ident = format_ident!("{}Systems", ident);
        let count = components.len();
        let positions: Vec<usize> = (0..count).collect();
        let fields: Vec<syn::Index> = positions.iter().map(|&i| syn::Index::from(i)).collect();
        let names: Vec<String> = components
            .iter()
            .map(|ty| ty.to_token_stream().to_string().replace(' ', ""))
            .collect();
        let components: Vec<&syn::Type> = components.iter().collect();

        let systems_doc = format!("One system per component type of [`{ident}`].");

        let item = quote! {
            #(#meta)*
            #vis enum #ident {}

            #[doc = #systems_doc]
            #vis struct #systems_ident(
                #(#crate_name::System<#ident, #components>,)*
            );

            impl ::core::default::Default for #systems_ident {
                fn default() -> Self {
                    Self(#(<#crate_name::System<#ident, #components> as ::core::default::Default>::default(),)*)
                }
            }

            impl #crate_name::Schema for #ident {
                const COUNT: usize = #count;
                const NAMES: &'static [&'static str] = &[#(#names),*];

                type Index = #index_ty;
                type Mask = #crate_name::bits::BitSet<{ #crate_name::bits::byte_len(#count) }>;
                type Slots = [#index_ty; #count];
                type Systems = #systems_ident;

                fn empty_slots() -> Self::Slots {
                    [<#index_ty as #crate_name::sparse::Index>::SENTINEL; #count]
                }
            }

            impl #crate_name::schema::Systems<#ident> for #systems_ident {
                #[allow(unused_variables)]
                fn unregister_at(
                    &mut self,
                    index: usize,
                    entity: #crate_name::Entity<#ident>,
                    record: &mut #crate_name::entity::Record<#ident>,
                ) -> bool {
                    match index {
                        #(
                            #positions => self.#fields.unregister_entity(entity, record).is_some(),
                        )*
                        _ => false,
                    }
                }
            }

            #(
                impl #crate_name::Component<#ident> for #components {
                    const INDEX: usize = #positions;

                    fn system(systems: &#systems_ident) -> &#crate_name::System<#ident, Self> {
                        &systems.#fields
                    }

                    fn system_mut(systems: &mut #systems_ident) -> &mut #crate_name::System<#ident, Self> {
                        &mut systems.#fields
                    }
                }

                #crate_name::_reexports::static_assertions::assert_impl_all!(#components: Send, Sync);
            )*
        };
        output.extend(item);
    }

    Ok(output)
}

struct Inputs(Vec<Input>);

impl Parse for Inputs {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut inputs = Vec::new();
        while !input.is_empty() {
            inputs.push(input.parse()?);
        }
        Ok(Self(inputs))
    }
}

struct Input {
    crate_name: Option<TokenStream>,
    meta:       Vec<syn::Attribute>,
    vis:        syn::Visibility,
    ident:      syn::Ident,
    opts:       Vec<Opt>,
    components: Punctuated<syn::Type, syn::Token![,]>,
    _semi:      Option<syn::Token![;]>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let crate_name = if input.peek(syn::Token![@]) {
            input.parse::<syn::Token![@]>()?;
            let inner;
            syn::parenthesized!(inner in input);
            Some(inner.parse::<TokenStream>()?)
        } else {
            None
        };

        let meta = input.call(syn::Attribute::parse_outer)?;
        let vis = input.parse()?;
        let ident = input.parse()?;

        let opts = if input.peek(syn::token::Paren) {
            let inner;
            syn::parenthesized!(inner in input);
            Punctuated::<Opt, syn::Token![,]>::parse_terminated(&inner)?.into_iter().collect()
        } else {
            Vec::new()
        };

        let inner;
        syn::braced!(inner in input);
        let components = Punctuated::parse_terminated(&inner)?;

        let semi = if input.peek(syn::Token![;]) { Some(input.parse()?) } else { None };

        Ok(Self { crate_name, meta, vis, ident, opts, components, _semi: semi })
    }
}

enum Opt {
    Index(syn::Ident, syn::Type),
}

impl Parse for Opt {
    fn parse(input: ParseStream) -> Result<Self> {
        let name = input.parse::<syn::Ident>()?;

        match name.to_string().as_str() {
            "index" => {
                input.parse::<syn::Token![=]>()?;
                let ty = input.parse::<syn::Type>()?;
                Ok(Opt::Index(name, ty))
            }
            _ => Err(Error::new_spanned(&name, format!("Unknown argument `{}`", name))),
        }
    }
}
