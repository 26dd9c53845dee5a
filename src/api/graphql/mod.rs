//! GraphQL endpoint: query/mutation execution on POST, GraphiQL on GET.

use async_graphql::{http::GraphiQLSource, EmptySubscription, Schema};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::infrastructure::upstream::UpstreamClient;

pub mod errors;
pub mod mutation;
pub mod query;
pub mod relations;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(upstream: UpstreamClient) -> GatewaySchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(upstream)
        .finish()
}

pub fn router(schema: GatewaySchema) -> Router {
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .with_state(schema)
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn graphql_handler(
    State(schema): State<GatewaySchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}
