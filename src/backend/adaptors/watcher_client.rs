//! Generates the REST client of a generation that exposes the watcher API.
//!
//! Generations differ only in path prefix, error type and response shapes; the
//! request sequencing, error mapping and [`WatchAdapter`](crate::WatchAdapter) impl
//! are shared.

macro_rules! watcher_client {
    (
        $(#[$meta:meta])*
        $client:ident {
            version: $version:ident,
            error: $error:ident,
            prefix: $prefix:expr,
            get: $get:ty,
            put: $put:ty,
            delete: $delete:ty,
            activate: $activate:ty,
            info: $info:ty $(,)?
        }
    ) => {
        $(#[$meta])*
        pub struct $client {
            transport: ::std::sync::Arc<dyn $crate::Transport>,
        }

        impl $client {
            const WATCHER_PREFIX: &'static [&'static str] = $prefix;

            pub fn new(transport: ::std::sync::Arc<dyn $crate::Transport>) -> Self {
                Self { transport }
            }

            pub async fn info(&self) -> ::std::result::Result<$info, $crate::$error> {
                self.execute(
                    $crate::constants::OP_PING,
                    $crate::Request::new(::reqwest::Method::GET, &[]),
                )
                .await
            }

            pub async fn xpack_watch_get(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<$get, $crate::$error> {
                let segments = super::rest::watch_segments(Self::WATCHER_PREFIX, watch_id, None);
                let response: $get = self
                    .execute(
                        $crate::constants::OP_GET_WATCH,
                        $crate::Request::new(::reqwest::Method::GET, &segments),
                    )
                    .await?;

                if !response.found {
                    return Err($crate::$error::Status {
                        status: 404,
                        details: $crate::ErrorDetails {
                            kind: None,
                            reason: format!("watch [{}] not found", watch_id),
                        },
                    });
                }
                Ok(response)
            }

            pub async fn xpack_watch_put(
                &self,
                watch_id: &str,
                body: &str,
            ) -> ::std::result::Result<$put, $crate::$error> {
                let segments = super::rest::watch_segments(Self::WATCHER_PREFIX, watch_id, None);
                self.execute(
                    $crate::constants::OP_PUT_WATCH,
                    $crate::Request::new(::reqwest::Method::PUT, &segments).with_body(body),
                )
                .await
            }

            pub async fn xpack_watch_delete(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<$delete, $crate::$error> {
                let segments = super::rest::watch_segments(Self::WATCHER_PREFIX, watch_id, None);
                self.execute(
                    $crate::constants::OP_DELETE_WATCH,
                    $crate::Request::new(::reqwest::Method::DELETE, &segments),
                )
                .await
            }

            pub async fn xpack_watch_activate(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<$activate, $crate::$error> {
                let segments = super::rest::watch_segments(Self::WATCHER_PREFIX, watch_id, Some("_activate"));
                self.execute(
                    $crate::constants::OP_ACTIVATE_WATCH,
                    $crate::Request::new(::reqwest::Method::PUT, &segments),
                )
                .await
            }

            pub async fn xpack_watch_deactivate(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<$activate, $crate::$error> {
                let segments = super::rest::watch_segments(Self::WATCHER_PREFIX, watch_id, Some("_deactivate"));
                self.execute(
                    $crate::constants::OP_DEACTIVATE_WATCH,
                    $crate::Request::new(::reqwest::Method::PUT, &segments),
                )
                .await
            }

            async fn execute<T: ::serde::de::DeserializeOwned>(
                &self,
                operation: &'static str,
                request: $crate::Request,
            ) -> ::std::result::Result<T, $crate::$error> {
                let response = super::rest::send(
                    self.transport.as_ref(),
                    $crate::BackendVersion::$version,
                    operation,
                    request,
                )
                .await?;

                if !response.is_success() {
                    return Err($crate::$error::Status {
                        status: response.status,
                        details: super::rest::error_details(response.status, &response.body),
                    });
                }

                Ok(::serde_json::from_str(&response.body)?)
            }
        }

        impl $crate::EndpointSource for $client {
            fn effective_endpoints(&self) -> Vec<String> {
                self.transport.urls()
            }
        }

        #[::async_trait::async_trait]
        impl $crate::WatchAdapter for $client {
            fn version(&self) -> $crate::BackendVersion {
                $crate::BackendVersion::$version
            }

            async fn ping(&self) -> ::std::result::Result<$crate::ClusterInfo, $crate::BackendError> {
                let info = self.info().await?;
                Ok($crate::ClusterInfo {
                    cluster_name: info.cluster_name,
                    version_number: info.version.map(|v| v.number),
                })
            }

            async fn get_watch(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<$crate::WatchRecord, $crate::BackendError> {
                Ok(self.xpack_watch_get(watch_id).await?.into())
            }

            async fn put_watch(
                &self,
                watch_id: &str,
                body: &str,
            ) -> ::std::result::Result<(), $crate::BackendError> {
                let response = self.xpack_watch_put(watch_id, body).await?;
                ::tracing::debug!(
                    "put watch {} (created: {}, version: {:?})",
                    response.id,
                    response.created,
                    response.version
                );
                Ok(())
            }

            async fn delete_watch(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<(), $crate::BackendError> {
                let response = self.xpack_watch_delete(watch_id).await?;
                ::tracing::debug!("deleted watch {} (found: {})", response.id, response.found);
                Ok(())
            }

            async fn activate_watch(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<(), $crate::BackendError> {
                self.xpack_watch_activate(watch_id).await?;
                Ok(())
            }

            async fn deactivate_watch(
                &self,
                watch_id: &str,
            ) -> ::std::result::Result<(), $crate::BackendError> {
                self.xpack_watch_deactivate(watch_id).await?;
                Ok(())
            }

            fn is_not_found(
                &self,
                err: &$crate::BackendError,
            ) -> bool {
                matches!(
                    err,
                    $crate::BackendError::$version($crate::$error::Status { status: 404, .. })
                )
            }
        }
    };
}
