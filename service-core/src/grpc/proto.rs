//! Message and client definitions for the `google.iam.v1.IAMPolicy` service.
//!
//! Field tags follow `google/iam/v1/policy.proto`, `google/iam/v1/options.proto`,
//! `google/iam/v1/iam_policy.proto` and `google/type/expr.proto`. Every field of
//! `Policy` and `Binding` is declared: the set call replaces the whole document,
//! so anything dropped on decode would be deleted on the server.

pub mod r#type {
    /// A CEL expression, used as the condition of a binding.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Expr {
        #[prost(string, tag = "1")]
        pub expression: ::prost::alloc::string::String,
        #[prost(string, tag = "2")]
        pub title: ::prost::alloc::string::String,
        #[prost(string, tag = "3")]
        pub description: ::prost::alloc::string::String,
        #[prost(string, tag = "4")]
        pub location: ::prost::alloc::string::String,
    }
}

pub mod iam {
    /// An access-control document attached to a resource.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Policy {
        #[prost(int32, tag = "1")]
        pub version: i32,
        #[prost(message, repeated, tag = "4")]
        pub bindings: ::prost::alloc::vec::Vec<Binding>,
        #[prost(message, repeated, tag = "6")]
        pub audit_configs: ::prost::alloc::vec::Vec<AuditConfig>,
        /// Opaque concurrency token. Passed through unmodified.
        #[prost(bytes = "vec", tag = "3")]
        pub etag: ::prost::alloc::vec::Vec<u8>,
    }

    /// Associates a list of members with a role, optionally under a condition.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Binding {
        #[prost(string, tag = "1")]
        pub role: ::prost::alloc::string::String,
        #[prost(string, repeated, tag = "2")]
        pub members: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
        #[prost(message, optional, tag = "3")]
        pub condition: ::core::option::Option<super::r#type::Expr>,
    }

    /// Audit logging settings for one service.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuditConfig {
        #[prost(string, tag = "1")]
        pub service: ::prost::alloc::string::String,
        #[prost(message, repeated, tag = "3")]
        pub audit_log_configs: ::prost::alloc::vec::Vec<AuditLogConfig>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AuditLogConfig {
        #[prost(enumeration = "audit_log_config::LogType", tag = "1")]
        pub log_type: i32,
        #[prost(string, repeated, tag = "2")]
        pub exempted_members: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    }

    pub mod audit_log_config {
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration,
        )]
        #[repr(i32)]
        pub enum LogType {
            Unspecified = 0,
            AdminRead = 1,
            DataWrite = 2,
            DataRead = 3,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetPolicyOptions {
        #[prost(int32, tag = "1")]
        pub requested_policy_version: i32,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct GetIamPolicyRequest {
        #[prost(string, tag = "1")]
        pub resource: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "2")]
        pub options: ::core::option::Option<GetPolicyOptions>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct SetIamPolicyRequest {
        #[prost(string, tag = "1")]
        pub resource: ::prost::alloc::string::String,
        #[prost(message, optional, tag = "2")]
        pub policy: ::core::option::Option<Policy>,
    }

    pub mod iam_policy_client {
        use tonic::codegen::http::uri::PathAndQuery;
        use tonic::codegen::*;

        const SERVICE: &str = "google.iam.v1.IAMPolicy";

        /// Unary client for the IAM policy service.
        #[derive(Debug, Clone)]
        pub struct IamPolicyClient<T> {
            inner: tonic::client::Grpc<T>,
        }

        impl<T> IamPolicyClient<T>
        where
            T: tonic::client::GrpcService<tonic::body::BoxBody>,
            T::Error: Into<StdError>,
            T::ResponseBody: Body<Data = Bytes> + std::marker::Send + 'static,
            <T::ResponseBody as Body>::Error: Into<StdError> + std::marker::Send,
        {
            pub fn new(inner: T) -> Self {
                let inner = tonic::client::Grpc::new(inner);
                Self { inner }
            }

            /// Gets the access control policy for a resource.
            pub async fn get_iam_policy(
                &mut self,
                request: impl tonic::IntoRequest<super::GetIamPolicyRequest>,
            ) -> std::result::Result<tonic::Response<super::Policy>, tonic::Status> {
                self.inner.ready().await.map_err(|e| {
                    tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
                })?;
                let codec = tonic::codec::ProstCodec::default();
                let path = PathAndQuery::from_static("/google.iam.v1.IAMPolicy/GetIamPolicy");
                let mut req = request.into_request();
                req.extensions_mut()
                    .insert(GrpcMethod::new(SERVICE, "GetIamPolicy"));
                self.inner.unary(req, path, codec).await
            }

            /// Replaces the access control policy of a resource.
            pub async fn set_iam_policy(
                &mut self,
                request: impl tonic::IntoRequest<super::SetIamPolicyRequest>,
            ) -> std::result::Result<tonic::Response<super::Policy>, tonic::Status> {
                self.inner.ready().await.map_err(|e| {
                    tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
                })?;
                let codec = tonic::codec::ProstCodec::default();
                let path = PathAndQuery::from_static("/google.iam.v1.IAMPolicy/SetIamPolicy");
                let mut req = request.into_request();
                req.extensions_mut()
                    .insert(GrpcMethod::new(SERVICE, "SetIamPolicy"));
                self.inner.unary(req, path, codec).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::iam::audit_log_config::LogType;
    use super::iam::{AuditConfig, AuditLogConfig, Binding, Policy};
    use super::r#type::Expr;
    use prost::Message;

    fn server_policy() -> Policy {
        Policy {
            version: 3,
            bindings: vec![Binding {
                role: "roles/viewer".to_string(),
                members: vec!["user:a".to_string(), "user:b".to_string()],
                condition: Some(Expr {
                    expression: "request.time < timestamp('2030-01-01T00:00:00Z')".to_string(),
                    title: "expires_2030".to_string(),
                    ..Default::default()
                }),
            }],
            audit_configs: vec![AuditConfig {
                service: "allServices".to_string(),
                audit_log_configs: vec![AuditLogConfig {
                    log_type: LogType::DataWrite as i32,
                    exempted_members: vec!["user:ops".to_string()],
                }],
            }],
            etag: b"BwXhqDaV".to_vec(),
        }
    }

    #[test]
    fn test_policy_decode_keeps_condition_and_audit_configs() {
        let wire = server_policy().encode_to_vec();

        let policy = Policy::decode(wire.as_slice()).unwrap();
        assert_eq!(policy, server_policy());
        assert_eq!(
            policy.bindings[0].condition.as_ref().unwrap().title,
            "expires_2030"
        );
        assert_eq!(policy.encode_to_vec(), wire);
    }

    #[test]
    fn test_condition_tag_matches_wire_layout() {
        // Binding.condition is field 3, length-delimited: key byte 0x1a.
        let binding = Binding {
            role: String::new(),
            members: Vec::new(),
            condition: Some(Expr {
                expression: "true".to_string(),
                ..Default::default()
            }),
        };
        assert_eq!(binding.encode_to_vec(), vec![0x1a, 0x06, 0x0a, 0x04, b't', b'r', b'u', b'e']);
    }
}
