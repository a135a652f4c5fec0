mod macros;
mod router;

pub use macros::{
    __delete_impl, __get_impl, __post_impl, __put_impl, validate_route_path, GroupDef,
    GroupRoute, RouteDef,
};
pub use router::{register_route_name, route, BoxedHandler, RouteMatch, Router};
