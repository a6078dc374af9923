//! Java / OkHttp.

use crate::body::{BodyFamily, MultipartPart};
use crate::prepare::PreparedRequest;
use crate::targets::{quote, ClientInfo, CodeBuilder, RenderOptions, Renderer};

const METHODS: [&str; 6] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD"];
const METHODS_WITH_BODY: [&str; 4] = ["POST", "PUT", "DELETE", "PATCH"];

#[derive(Debug, Clone, Copy, Default)]
pub struct OkHttp;

impl OkHttp {
    pub fn info() -> ClientInfo {
        ClientInfo::new("okhttp", "OkHttp")
            .with_link("http://square.github.io/okhttp/")
            .with_description("An HTTP Request Client Library")
    }
}

impl Renderer for OkHttp {
    fn render(&self, source: &PreparedRequest, options: &RenderOptions) -> String {
        let indent = options.indent();
        let mut code = CodeBuilder::new(indent);

        code.push("OkHttpClient client = new OkHttpClient();").blank();

        let post = &source.post_data;
        let has_body = match post.family() {
            BodyFamily::Multipart if !post.parts.is_empty() => {
                code.push("RequestBody body = new MultipartBody.Builder()");
                if post.mime_type.eq_ignore_ascii_case("multipart/form-data") {
                    code.push_indented(1, ".setType(MultipartBody.FORM)");
                } else {
                    code.push_indented(
                        1,
                        format!(".setType(MediaType.parse({}))", quote(&post.mime_type)),
                    );
                }
                for part in &post.parts {
                    match part {
                        MultipartPart::File {
                            name,
                            file_name,
                            content_type,
                        } => {
                            let media = content_type.as_deref().unwrap_or("text/plain");
                            code.push_indented(
                                1,
                                format!(".addFormDataPart({}, {},", quote(name), quote(file_name)),
                            )
                            .push_indented(
                                2,
                                format!(
                                    "RequestBody.create(MediaType.parse({}), new File({})))",
                                    quote(media),
                                    quote(file_name)
                                ),
                            );
                        }
                        MultipartPart::Value { name, value } => {
                            code.push_indented(
                                1,
                                format!(".addFormDataPart({}, {})", quote(name), quote(value)),
                            );
                        }
                    }
                }
                code.push_indented(1, ".build();");
                true
            }
            BodyFamily::FormUrlEncoded if post.params_obj.is_some() => {
                code.push("RequestBody body = new FormBody.Builder()");
                for (name, value) in post.params_obj.iter().flatten() {
                    code.push_indented(1, format!(".add({}, {})", quote(name), quote(value)));
                }
                code.push_indented(1, ".build();");
                true
            }
            _ if !post.text.is_empty() => {
                code.push(format!(
                    "MediaType mediaType = MediaType.parse({});",
                    quote(&post.mime_type)
                ))
                .push(format!("String value = {};", quote(&post.text)))
                .push("RequestBody body = RequestBody.create(mediaType, value);");
                true
            }
            _ => false,
        };

        if has_body {
            code.blank();
        }

        code.push("Request request = new Request.Builder()")
            .push_indented(1, format!(".url({})", quote(&source.full_url)));

        let method = source.method.to_ascii_uppercase();
        let body_arg = if has_body { "body" } else { "null" };
        if !METHODS.contains(&method.as_str()) {
            code.push_indented(1, format!(".method({}, {})", quote(&method), body_arg));
        } else if METHODS_WITH_BODY.contains(&method.as_str()) {
            code.push_indented(1, format!(".{}({})", method.to_ascii_lowercase(), body_arg));
        } else {
            code.push_indented(1, format!(".{}()", method.to_ascii_lowercase()));
        }

        // OkHttp sets the multipart content-type (with its own boundary) itself.
        for (name, value) in &source.all_headers {
            if value.to_ascii_lowercase().contains("multipart/form-data") {
                continue;
            }
            code.push_indented(1, format!(".addHeader({}, {})", quote(name), quote(value)));
        }

        code.push_indented(1, ".build();")
            .blank()
            .push("Response response = client.newCall(request).execute();");

        code.join()
    }
}
