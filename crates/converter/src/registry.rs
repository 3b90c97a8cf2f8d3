//! Ordered converter factory registry.
//!
//! [`Converters`] asks its factories one after another and takes the first converter
//! offered. The built-in factory always comes first, user factories follow in the order
//! they were added.

use crate::annotation::Annotations;
use crate::builtin::BuiltInConverters;
use crate::converter::{ConverterFactory, RequestBodyConverter, ResponseBodyConverter, StringConverter};
use crate::error::{ConvertError, ConverterKind};
use crate::target_type::TargetType;
use std::ptr;
use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone)]
pub struct Converters {
    factories: Arc<[Arc<dyn ConverterFactory>]>,
}

impl Converters {
    /// Creates a builder that starts with the shared built-in factory
    pub fn builder() -> ConvertersBuilder {
        ConvertersBuilder::new()
    }

    pub fn factories(&self) -> &[Arc<dyn ConverterFactory>] {
        &self.factories
    }

    pub fn response_body_converter(
        &self,
        target: &TargetType,
        annotations: &Annotations,
    ) -> Result<Arc<dyn ResponseBodyConverter>, ConvertError> {
        self.next_response_body_converter(None, target, annotations)
    }

    /// Like [`Converters::response_body_converter`], but only asks the factories after
    /// `skip_past`. Starts from the first factory when `skip_past` is not registered.
    pub fn next_response_body_converter(
        &self,
        skip_past: Option<&dyn ConverterFactory>,
        target: &TargetType,
        annotations: &Annotations,
    ) -> Result<Arc<dyn ResponseBodyConverter>, ConvertError> {
        let start = self.start_after(skip_past);
        for (index, factory) in self.factories.iter().enumerate().skip(start) {
            if let Some(converter) = factory.response_body_converter(target, annotations) {
                trace!(factory = index, target = %target, "resolved response body converter");
                return Ok(converter);
            }
        }
        Err(ConvertError::no_converter(ConverterKind::Response, target, self.factories.len() - start))
    }

    pub fn request_body_converter(
        &self,
        target: &TargetType,
        param_annotations: &Annotations,
        method_annotations: &Annotations,
    ) -> Result<Arc<dyn RequestBodyConverter>, ConvertError> {
        self.next_request_body_converter(None, target, param_annotations, method_annotations)
    }

    /// Like [`Converters::request_body_converter`], but only asks the factories after
    /// `skip_past`.
    pub fn next_request_body_converter(
        &self,
        skip_past: Option<&dyn ConverterFactory>,
        target: &TargetType,
        param_annotations: &Annotations,
        method_annotations: &Annotations,
    ) -> Result<Arc<dyn RequestBodyConverter>, ConvertError> {
        let start = self.start_after(skip_past);
        for (index, factory) in self.factories.iter().enumerate().skip(start) {
            if let Some(converter) = factory.request_body_converter(target, param_annotations, method_annotations) {
                trace!(factory = index, target = %target, "resolved request body converter");
                return Ok(converter);
            }
        }
        Err(ConvertError::no_converter(ConverterKind::Request, target, self.factories.len() - start))
    }

    /// Returns the first string converter offered, falling back to `Display`
    pub fn string_converter(&self, target: &TargetType, annotations: &Annotations) -> Arc<dyn StringConverter> {
        self.factories
            .iter()
            .find_map(|factory| factory.string_converter(target, annotations))
            .unwrap_or_else(BuiltInConverters::to_string_converter)
    }

    fn start_after(&self, skip_past: Option<&dyn ConverterFactory>) -> usize {
        let Some(skip) = skip_past else {
            return 0;
        };
        self.factories
            .iter()
            .position(|factory| ptr::addr_eq(Arc::as_ptr(factory), ptr::from_ref(skip)))
            .map_or(0, |index| index + 1)
    }
}

impl Default for Converters {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug)]
pub struct ConvertersBuilder {
    builtins: Arc<BuiltInConverters>,
    factories: Vec<Arc<dyn ConverterFactory>>,
}

impl ConvertersBuilder {
    fn new() -> Self {
        Self { builtins: BuiltInConverters::shared(), factories: vec![] }
    }

    /// Replaces the shared built-in factory, e.g. to use another sentinel provider
    #[must_use]
    pub fn with_builtins(mut self, builtins: BuiltInConverters) -> Self {
        self.builtins = Arc::new(builtins);
        self
    }

    #[must_use]
    pub fn add_factory<F: ConverterFactory + 'static>(self, factory: F) -> Self {
        self.add_shared_factory(Arc::new(factory))
    }

    #[must_use]
    pub fn add_shared_factory(mut self, factory: Arc<dyn ConverterFactory>) -> Self {
        self.factories.push(factory);
        self
    }

    pub fn build(self) -> Converters {
        let builtins: Arc<dyn ConverterFactory> = self.builtins;
        let factories = std::iter::once(builtins).chain(self.factories).collect();
        Converters { factories }
    }
}

#[cfg(test)]
mod tests {
    use super::Converters;
    use crate::annotation::{Annotations, Streaming};
    use crate::builtin::BuiltInConverters;
    use crate::converter::{ConverterFactory, RequestBodyConverter, ResponseBodyConverter, StringConverter, Value};
    use crate::error::{ConvertError, ConverterKind, FeatureUnavailable};
    use crate::sentinel::{SentinelProvider, Void};
    use crate::target_type::TargetType;
    use micro_client::protocol::RawResponse;
    use micro_client::protocol::body::RequestBody;
    use std::fmt::Display;
    use std::sync::Arc;

    struct User;

    #[derive(Debug)]
    struct UserConverter(&'static str);

    impl ResponseBodyConverter for UserConverter {
        fn convert(&self, _response: RawResponse) -> Result<Value, ConvertError> {
            Ok(Box::new(self.0))
        }
    }

    impl RequestBodyConverter for UserConverter {
        fn convert(&self, _value: Value) -> Result<RequestBody, ConvertError> {
            Ok(RequestBody::text(self.0))
        }
    }

    /// Claims `User` and, greedily, `RawResponse`.
    #[derive(Debug)]
    struct UserFactory(&'static str);

    impl ConverterFactory for UserFactory {
        fn response_body_converter(
            &self,
            target: &TargetType,
            _annotations: &Annotations,
        ) -> Option<Arc<dyn ResponseBodyConverter>> {
            (target.is::<User>() || target.is::<RawResponse>()).then(|| Arc::new(UserConverter(self.0)) as _)
        }

        fn request_body_converter(
            &self,
            target: &TargetType,
            _param_annotations: &Annotations,
            _method_annotations: &Annotations,
        ) -> Option<Arc<dyn RequestBodyConverter>> {
            target.is::<User>().then(|| Arc::new(UserConverter(self.0)) as _)
        }
    }

    #[derive(Debug)]
    struct Quoted;

    impl StringConverter for Quoted {
        fn convert(&self, value: &dyn Display) -> Result<String, ConvertError> {
            Ok(format!("\"{value}\""))
        }
    }

    #[derive(Debug)]
    struct QuotedFactory;

    impl ConverterFactory for QuotedFactory {
        fn string_converter(&self, target: &TargetType, _annotations: &Annotations) -> Option<Arc<dyn StringConverter>> {
            target.is::<String>().then(|| Arc::new(Quoted) as _)
        }
    }

    #[derive(Debug)]
    struct NoUnit;

    impl SentinelProvider for NoUnit {
        fn unit_type(&self) -> Result<TargetType, FeatureUnavailable> {
            Err(FeatureUnavailable::new("()"))
        }
    }

    fn label(converter: &Arc<dyn ResponseBodyConverter>) -> &'static str {
        let response = RawResponse::from(http::Response::new(""));
        *converter.convert(response).unwrap().downcast::<&'static str>().unwrap()
    }

    #[test]
    fn builtins_come_first() {
        let converters = Converters::builder().add_factory(UserFactory("user")).build();

        assert_eq!(converters.factories().len(), 2);
        let converter = converters.response_body_converter(&TargetType::of::<RawResponse>(), &Annotations::empty());
        assert!(Arc::ptr_eq(&converter.unwrap(), &BuiltInConverters::buffering()));

        let streaming = Annotations::from(Streaming);
        let converter = converters.response_body_converter(&TargetType::of::<RawResponse>(), &streaming);
        assert!(Arc::ptr_eq(&converter.unwrap(), &BuiltInConverters::streaming()));
    }

    #[test]
    fn first_user_factory_wins() {
        let converters =
            Converters::builder().add_factory(UserFactory("first")).add_factory(UserFactory("second")).build();

        let converter = converters.response_body_converter(&TargetType::of::<User>(), &Annotations::empty()).unwrap();
        assert_eq!(label(&converter), "first");
    }

    #[test]
    fn skip_past_delegates_to_later_factories() {
        let first: Arc<dyn ConverterFactory> = Arc::new(UserFactory("first"));
        let converters = Converters::builder()
            .add_shared_factory(Arc::clone(&first))
            .add_factory(UserFactory("second"))
            .build();

        let converter = converters
            .next_response_body_converter(Some(first.as_ref()), &TargetType::of::<User>(), &Annotations::empty())
            .unwrap();
        assert_eq!(label(&converter), "second");

        let builtins = Arc::clone(&converters.factories()[0]);
        let target = TargetType::of::<RawResponse>();
        let converter =
            converters.next_response_body_converter(Some(builtins.as_ref()), &target, &Annotations::empty()).unwrap();
        assert_eq!(label(&converter), "first");
    }

    #[test]
    fn unknown_skip_past_starts_from_the_beginning() {
        let stranger = UserFactory("stranger");
        let converters = Converters::builder().add_factory(UserFactory("user")).build();

        let skip: &dyn ConverterFactory = &stranger;
        let converter =
            converters.next_response_body_converter(Some(skip), &TargetType::of::<Void>(), &Annotations::empty()).unwrap();
        assert!(Arc::ptr_eq(&converter, &BuiltInConverters::void()));
    }

    #[test]
    fn miss_reports_the_target() {
        let converters = Converters::default();

        let err = converters.response_body_converter(&TargetType::of::<User>(), &Annotations::empty()).unwrap_err();
        assert!(matches!(err, ConvertError::NoConverter { kind: ConverterKind::Response, tried: 1, .. }));

        let empty = Annotations::empty();
        let err = converters.request_body_converter(&TargetType::of::<User>(), &empty, &empty).unwrap_err();
        assert!(matches!(err, ConvertError::NoConverter { kind: ConverterKind::Request, tried: 1, .. }));
    }

    #[test]
    fn request_side_chains_like_response_side() {
        let converters = Converters::builder().add_factory(UserFactory("user")).build();
        let empty = Annotations::empty();

        let builtin = converters.request_body_converter(&TargetType::of::<RequestBody>(), &empty, &empty).unwrap();
        assert!(Arc::ptr_eq(&builtin, &BuiltInConverters::request_body()));

        let user = converters.request_body_converter(&TargetType::of::<User>(), &empty, &empty).unwrap();
        let body = user.convert(Box::new(User)).unwrap();
        assert_eq!(body.content_length(), Some(4));

        let builtins = Arc::clone(&converters.factories()[0]);
        let err = converters
            .next_request_body_converter(Some(builtins.as_ref()), &TargetType::of::<RequestBody>(), &empty, &empty)
            .unwrap_err();
        assert!(matches!(err, ConvertError::NoConverter { tried: 1, .. }));
    }

    #[test]
    fn custom_builtins_are_used() {
        let converters = Converters::builder().with_builtins(BuiltInConverters::with_sentinels(NoUnit)).build();

        let err = converters.response_body_converter(&TargetType::of::<()>(), &Annotations::empty()).unwrap_err();
        assert!(matches!(err, ConvertError::NoConverter { .. }));
    }

    #[test]
    fn string_converter_falls_back_to_display() {
        let converters = Converters::builder().add_factory(QuotedFactory).build();

        let quoted = converters.string_converter(&TargetType::of::<String>(), &Annotations::empty());
        assert_eq!(quoted.convert(&"id").unwrap(), "\"id\"");

        let plain = converters.string_converter(&TargetType::of::<u64>(), &Annotations::empty());
        assert!(Arc::ptr_eq(&plain, &BuiltInConverters::to_string_converter()));
        assert_eq!(plain.convert(&42_u64).unwrap(), "42");
    }
}
