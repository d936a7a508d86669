use crate::{
    room::{Room, RoomRepository},
    websockets::errors::EventError,
};
use std::sync::Arc;

pub struct RoomQueryUtils;

impl RoomQueryUtils {
    pub async fn get_room_or_error(
        room_repository: &Arc<dyn RoomRepository>,
        room_code: &str,
    ) -> Result<Arc<Room>, EventError> {
        room_repository
            .get_room(room_code)
            .await
            .ok_or_else(|| EventError::RoomNotFound(room_code.to_string()))
    }
}
