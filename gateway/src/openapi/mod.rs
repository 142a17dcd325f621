//! OpenAPI documentation for the gateway, served at `/docs`.

use crate::api;
use crate::errors::ErrorResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Chiops gateway",
        description = "Fleet operations API. Every route forwards to one backend service."
    ),
    paths(
        api::handlers::administrators::create_administrator,
        api::handlers::administrators::sign_in_administrator,
        api::handlers::administrators::find_administrator_by_email,
        api::handlers::administrators::delete_administrator_by_email,
        api::handlers::administrators::update_administrator,
        api::handlers::administrators::get_administrator_list,
        api::handlers::auth::login,
        api::handlers::auth::register,
        api::handlers::drivers::create_driver,
        api::handlers::drivers::update_driver,
        api::handlers::drivers::delete_driver,
        api::handlers::drivers::get_driver_by_curp,
        api::handlers::drivers::get_all_drivers,
        api::handlers::invitation_codes::find_by_code,
        api::handlers::invitation_codes::generate_invitation_code,
        api::handlers::invitation_codes::delete_by_code,
        api::handlers::invitation_codes::mark_as_used,
        api::handlers::problems::assign_problem,
        api::handlers::problems::update_problem,
        api::handlers::problems::delete_problem,
        api::handlers::problems::get_problem,
        api::handlers::routes::create_route,
        api::handlers::routes::update_route,
        api::handlers::routes::delete_route,
        api::handlers::routes::get_all_routes,
        api::handlers::routes::get_route_by_vin,
        api::handlers::vehicle_assignments::find_by_status,
        api::handlers::vehicle_assignments::assignments_history,
        api::handlers::vehicle_assignments::find_by_vin,
        api::handlers::vehicle_assignments::assign_vehicle_to_driver,
        api::handlers::vehicle_assignments::release_vehicle_from_driver,
        api::handlers::vehicle_assignments::change_driver,
        api::handlers::vehicles::create_vehicle,
        api::handlers::vehicles::update_vehicle,
        api::handlers::vehicles::delete_vehicle,
        api::handlers::vehicles::get_vehicle_by_vin,
        api::handlers::vehicles::get_all_vehicles_by_model,
        api::handlers::vehicles::get_all_vehicles,
        api::handlers::vehicles::view_image,
    ),
    components(
        schemas(
            ErrorResponse,
            api::models::administrators::AdministratorRequest,
            api::models::administrators::AdministratorResponse,
            api::models::assignments::VehicleAssignment,
            api::models::drivers::Driver,
            api::models::invitation_codes::InvitationCode,
            api::models::routes::Problem,
            api::models::routes::Route,
            api::models::vehicles::Vehicle,
            api::models::vehicles::VehicleCreateForm,
        )
    ),
    tags(
        (name = "administrators", description = "Administrator accounts."),
        (name = "auth", description = "Login and registration. Responses come straight from the authentication service."),
        (name = "drivers", description = "Drivers, identified by CURP."),
        (name = "invitation_codes", description = "Single-use codes required to register an administrator."),
        (name = "problems", description = "Problems reported on a vehicle's route."),
        (name = "routes", description = "Routes, one per vehicle."),
        (name = "vehicle_assignments", description = "Which driver has which vehicle, now and historically."),
        (name = "vehicles", description = "Vehicles, identified by VIN, and their images."),
    )
)]
pub struct ApiDoc;
