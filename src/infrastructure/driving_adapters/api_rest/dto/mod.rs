//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod node;
pub mod node_user;

pub use node::{
    CreateNodeDto, FabricCaDto, NodeCreationResponseDto, NodeFileDto, NodeFileResponseDto,
    NodeOperationDto, NodeOperationResponseDto, NodeQueryDto, NodeQueryResponseDto, NodeUpdateDto,
    NodeUpdateResponseDto, PortDto,
};
pub use node_user::{NodeUserCreateDto, NodeUserPatchDto, NodeUserPatchResponseDto, NodeUserResponseDto};
