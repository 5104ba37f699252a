use proc_macro::TokenStream;

mod schema;

#[proc_macro]
pub fn schema(input: TokenStream) -> TokenStream {
    schema::imp(input.into()).unwrap_or_else(|err| err.to_compile_error()).into()
}
