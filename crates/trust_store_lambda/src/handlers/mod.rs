pub mod authorizer;
pub mod custom_resource;
pub mod dispatcher;
pub mod echo;
pub mod guard;
pub mod token_scopes;
