/// Generate a typed category method that routes to an explicit provider when
/// one is given and falls back to default routing otherwise.
macro_rules! tributary_category_method {
    (
        $(#[$meta:meta])*
        method: $name:ident,
        category: $category:ty
    ) => {
        $(#[$meta])*
        #[cfg_attr(
            feature = "tracing",
            tracing::instrument(target = "tributary::router", skip(self, params))
        )]
        ///
        /// With `provider: None` the request goes through default routing.
        ///
        /// # Errors
        /// Returns an error if the provider or category is unknown, the params
        /// are invalid, or no provider produced valid records.
        pub async fn $name(
            &self,
            provider: Option<&str>,
            params: tributary_core::category::ParamsOf<$category>,
        ) -> Result<
            Vec<tributary_core::category::DataOf<$category>>,
            tributary_core::TributaryError,
        > {
            match provider {
                Some(p) => self.fetch::<$category>(p, params).await,
                None => self.fetch_default::<$category>(params).await,
            }
        }
    };
}
