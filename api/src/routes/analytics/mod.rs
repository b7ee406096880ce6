pub mod analytics_route;
