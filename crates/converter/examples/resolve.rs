use http::{Response, StatusCode};
use micro_client::protocol::RawResponse;
use micro_client::protocol::body::RequestBody;
use micro_converter::{
    Annotations, ConvertError, ConverterFactory, Converters, ResponseBodyConverter, Streaming, TargetType, Value, Void,
};
use std::sync::Arc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Reads an in-memory body as UTF-8 text.
#[derive(Debug)]
struct Utf8Converter;

impl ResponseBodyConverter for Utf8Converter {
    fn convert(&self, mut response: RawResponse) -> Result<Value, ConvertError> {
        let text = match response.body()?.as_bytes() {
            Some(bytes) => String::from_utf8(bytes.to_vec()).map_err(|e| ConvertError::type_mismatch("utf-8 text", e))?,
            None => String::new(),
        };
        response.close()?;
        Ok(Box::new(text))
    }
}

#[derive(Debug)]
struct TextFactory;

impl ConverterFactory for TextFactory {
    fn response_body_converter(
        &self,
        target: &TargetType,
        _annotations: &Annotations,
    ) -> Option<Arc<dyn ResponseBodyConverter>> {
        target.is::<String>().then(|| Arc::new(Utf8Converter) as _)
    }
}

fn response(body: &'static str) -> RawResponse {
    RawResponse::from(Response::builder().status(StatusCode::OK).body(body).unwrap_or_default())
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::TRACE).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let converters = Converters::builder().add_factory(TextFactory).build();

    let targets = [
        ("raw, buffered", TargetType::of::<RawResponse>(), Annotations::empty()),
        ("raw, streaming", TargetType::of::<RawResponse>(), Annotations::from(Streaming)),
        ("void", TargetType::of::<Void>(), Annotations::empty()),
        ("unit", TargetType::of::<()>(), Annotations::empty()),
        ("text", TargetType::of::<String>(), Annotations::empty()),
        ("unknown", TargetType::of::<Vec<u8>>(), Annotations::empty()),
    ];

    for (label, target, annotations) in &targets {
        match converters.response_body_converter(target, annotations) {
            Ok(converter) => match converter.convert(response("hello converters")) {
                Ok(value) => info!(label, converter = ?converter, is_text = value.is::<String>(), "converted"),
                Err(e) => error!(label, cause = %e, "conversion failed"),
            },
            Err(e) => info!(label, cause = %e, "no converter"),
        }
    }

    let empty = Annotations::empty();
    match converters.request_body_converter(&TargetType::of::<RequestBody>(), &empty, &empty) {
        Ok(converter) => match converter.convert(Box::new(RequestBody::text("ping"))) {
            Ok(body) => info!(content_length = body.content_length(), "request body passed through"),
            Err(e) => error!(cause = %e, "request conversion failed"),
        },
        Err(e) => error!(cause = %e, "no request converter"),
    }
}
