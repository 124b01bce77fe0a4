mod contact_routes;
mod health_check;
